//! Building `.mod` registration files from a downloaded mod's description files.

use bon::Builder;
use tracing::{debug, instrument};

use crate::{
    error::{Error, Result},
    read::Decode,
    types::{ArkString, Metadata, ModFile, ModInfo, ModMetaInfo, MODFILE_MAGIC},
    write::Encode,
};

/// Where the game looks for installed mod content, relative to its binaries
pub const DEFAULT_MOD_PATH_TEMPLATE: &str = "../../../ShooterGame/Content/Mods/{modid}";

/// Placeholder replaced by the decimal mod id
pub const MOD_ID_PLACEHOLDER: &str = "{modid}";

/// Metadata key carrying the numeric mod type
pub const MOD_TYPE_KEY: &str = "ModType";

/// Mod type assumed when the metadata does not name one
pub const DEFAULT_MOD_TYPE: u8 = 1;

/// Metadata used when a mod ships without `modmeta.info`
pub fn default_metadata() -> Metadata {
    [(MOD_TYPE_KEY, DEFAULT_MOD_TYPE.to_string())]
        .into_iter()
        .collect()
}

/// Options for how `.mod` files are generated
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct GeneratorOptions {
    /// Template for the mod path, see [`MOD_ID_PLACEHOLDER`]
    #[builder(default = DEFAULT_MOD_PATH_TEMPLATE.to_owned())]
    pub path_template: String,

    /// Magic bytes written into the file
    #[builder(default = MODFILE_MAGIC)]
    pub magic: [u8; 8],

    /// Metadata used when no `modmeta.info` is given
    #[builder(default = default_metadata())]
    pub default_metadata: Metadata,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Substitute `mod_id` into `template`
pub fn render_mod_path(template: &str, mod_id: u64) -> ArkString {
    template
        .replace(MOD_ID_PLACEHOLDER, &mod_id.to_string())
        .into()
}

/// Find the mod type in `metadata`, appending the default entry when there is none
///
/// With repeated keys the last entry wins.
pub fn resolve_mod_type(metadata: &mut Metadata) -> Result<u8> {
    let Some(value) = metadata.get(MOD_TYPE_KEY) else {
        metadata.push(MOD_TYPE_KEY, DEFAULT_MOD_TYPE.to_string());
        return Ok(DEFAULT_MOD_TYPE);
    };

    std::str::from_utf8(value)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .ok_or_else(|| Error::MetadataParse {
            key: MOD_TYPE_KEY.to_owned(),
            value: value.to_string_lossy().into_owned(),
        })
}

/// Assemble a `.mod` record from already decoded description records
///
/// The trailer of `info` is not carried over, the registration file has no place for it.
#[instrument(skip(info, meta, options), fields(mod_name = %info.mod_name), err)]
pub fn build_modfile(
    mod_id: u64,
    info: ModInfo,
    meta: Option<ModMetaInfo>,
    options: &GeneratorOptions,
) -> Result<ModFile> {
    let mut metadata = match meta {
        Some(meta) => meta.entries,
        None => options.default_metadata.clone(),
    };
    let mod_type = resolve_mod_type(&mut metadata)?;
    let mod_path = render_mod_path(&options.path_template, mod_id);

    debug!(mod_type, mod_path = %mod_path, "built mod file");
    Ok(ModFile {
        mod_id,
        mod_name: info.mod_name,
        mod_path,
        map_filenames: info.map_filenames,
        magic: options.magic,
        mod_type,
        metadata,
    })
}

/// Generate the bytes of `<mod_id>.mod` from the contents of `mod.info` and, if present, `modmeta.info`
///
/// ```
/// use ark_mod::{generate_modfile, Decode, GeneratorOptions, ModFile};
///
/// let mod_info = b"\x04\x00\x00\x00Foo\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
/// let bytes = generate_modfile(123, mod_info, None, &GeneratorOptions::default())?;
///
/// let modfile = ModFile::from_bytes(&bytes)?;
/// assert_eq!(modfile.mod_path.as_bytes(), b"../../../ShooterGame/Content/Mods/123");
/// assert_eq!(modfile.mod_type, 1);
/// # Ok::<(), ark_mod::error::Error>(())
/// ```
pub fn generate_modfile(
    mod_id: u64,
    mod_info: &[u8],
    mod_meta: Option<&[u8]>,
    options: &GeneratorOptions,
) -> Result<Vec<u8>> {
    let info = ModInfo::from_bytes(mod_info)?;
    let meta = mod_meta.map(ModMetaInfo::from_bytes).transpose()?;

    build_modfile(mod_id, info, meta, options)?.to_bytes()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::generate::{
        build_modfile, generate_modfile, render_mod_path, resolve_mod_type, GeneratorOptions,
    };
    use crate::read::Decode;
    use crate::types::{
        ArkString, Metadata, ModFile, ModInfo, ModMetaInfo, StringArray, MODFILE_MAGIC,
    };
    use crate::write::Encode;

    fn mod_info() -> ModInfo {
        ModInfo::builder()
            .mod_name("Structures Plus (S+)")
            .map_filenames(["SP_Island", "SP_Center"].into_iter().collect::<StringArray>())
            .trailer([0xAA; 8])
            .build()
    }

    #[test]
    fn render_default_path() {
        assert_eq!(
            render_mod_path(&GeneratorOptions::default().path_template, 731604991),
            ArkString::from("../../../ShooterGame/Content/Mods/731604991")
        );
        assert_eq!(render_mod_path("Mods/{modid}/{modid}", 7).as_bytes(), b"Mods/7/7");
    }

    #[test]
    fn generate_without_meta() -> Result<()> {
        let bytes = generate_modfile(123, &mod_info().to_bytes()?, None, &Default::default())?;
        let modfile = ModFile::from_bytes(&bytes)?;

        assert_eq!(modfile.mod_id, 123);
        assert_eq!(modfile.mod_name, mod_info().mod_name);
        assert_eq!(modfile.map_filenames, mod_info().map_filenames);
        assert_eq!(modfile.mod_path.as_bytes(), b"../../../ShooterGame/Content/Mods/123");
        assert_eq!(modfile.magic, MODFILE_MAGIC);
        assert_eq!(modfile.mod_type, 1);
        assert_eq!(
            modfile.metadata,
            [("ModType", "1")].into_iter().collect::<Metadata>()
        );

        Ok(())
    }

    #[test]
    fn generate_with_meta() -> Result<()> {
        let entries: Metadata = [("ModType", "2"), ("Foo", "Bar")].into_iter().collect();
        let meta = ModMetaInfo::new(entries.clone()).to_bytes()?;

        let bytes = generate_modfile(
            123,
            &mod_info().to_bytes()?,
            Some(meta.as_slice()),
            &Default::default(),
        )?;
        let modfile = ModFile::from_bytes(&bytes)?;

        assert_eq!(modfile.mod_type, 2);
        assert_eq!(modfile.metadata, entries);

        Ok(())
    }

    #[test]
    fn generate_appends_missing_mod_type() -> Result<()> {
        let meta = ModMetaInfo::new([("Foo", "Bar")].into_iter().collect());

        let modfile = build_modfile(5, mod_info(), Some(meta), &Default::default())?;
        assert_eq!(modfile.mod_type, 1);
        assert_eq!(
            modfile.metadata,
            [("Foo", "Bar"), ("ModType", "1")]
                .into_iter()
                .collect::<Metadata>()
        );

        Ok(())
    }

    #[test]
    fn generate_with_substituted_options() -> Result<()> {
        let options = GeneratorOptions::builder()
            .path_template("Mods/{modid}".to_owned())
            .magic(*b"ALTMAGIC")
            .default_metadata([("ModType", "3")].into_iter().collect())
            .build();

        let modfile = build_modfile(42, mod_info(), None, &options)?;
        assert_eq!(modfile.mod_path.as_bytes(), b"Mods/42");
        assert_eq!(&modfile.magic, b"ALTMAGIC");
        assert_eq!(modfile.mod_type, 3);

        Ok(())
    }

    #[test]
    fn mod_type_must_be_numeric() {
        let mut metadata: Metadata = [("ModType", "Total Conversion")].into_iter().collect();
        assert!(matches!(
            resolve_mod_type(&mut metadata),
            Err(Error::MetadataParse { value, .. }) if value == "Total Conversion"
        ));

        let mut metadata: Metadata = [("ModType", "300")].into_iter().collect();
        assert!(matches!(
            resolve_mod_type(&mut metadata),
            Err(Error::MetadataParse { .. })
        ));
    }

    #[test]
    fn generate_propagates_truncated_info() {
        let result = generate_modfile(1, b"\x04\x00\x00\x00Fo", None, &Default::default());
        assert!(matches!(result, Err(Error::TruncatedInput { .. })));
    }
}
