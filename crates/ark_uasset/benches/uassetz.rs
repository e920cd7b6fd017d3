use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input() -> Vec<u8> {
    std::fs::read(format!(
        "{}/resources/Content/PrimalItem_Saddle.uasset",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

pub mod read {
    use ark_uasset::{decompress_bytes, inspect, DecompressOptions};
    use divan::Bencher;

    fn get_container() -> Vec<u8> {
        std::fs::read(format!(
            "{}/resources/Content/PrimalItem_Saddle.uasset.z",
            env!("CARGO_MANIFEST_DIR")
        ))
        .unwrap()
    }

    #[divan::bench]
    fn chunk_table(bencher: Bencher) {
        bencher.with_inputs(get_container).bench_refs(|data| {
            divan::black_box(inspect(&data[..], &DecompressOptions::default()).unwrap());
        });
    }

    #[divan::bench(sample_count = 10)]
    fn decompress(bencher: Bencher) {
        bencher.with_inputs(get_container).bench_refs(|data| {
            divan::black_box(decompress_bytes(data, &DecompressOptions::default()).unwrap());
        });
    }
}

pub mod write {
    use ark_uasset::{compress_bytes, CompressOptions};
    use divan::Bencher;

    #[divan::bench(sample_count = 10, args = [0x1000, 0x20000])]
    fn compress(bencher: Bencher, chunk_size: u64) {
        let options = CompressOptions::builder().chunk_size(chunk_size).build();
        bencher.with_inputs(super::get_input).bench_refs(|data| {
            divan::black_box(compress_bytes(data, &options).unwrap());
        });
    }
}
