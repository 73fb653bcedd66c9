use cobstream::{FrameEncoder, FrameWriter};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct TestHarness {
    _temp_file: NamedTempFile,
    path: PathBuf,
    rng: StdRng,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        let rng = StdRng::seed_from_u64(0x005E_ED42);
        Self {
            _temp_file: temp_file,
            path,
            rng,
        }
    }

    pub fn writer<E: FrameEncoder>(&self, encoder: E) -> FrameWriter<BufWriter<File>, E> {
        let file = File::create(&self.path).unwrap();
        FrameWriter::new(BufWriter::new(file), encoder)
    }

    pub fn read_all(&self) -> Vec<u8> {
        fs::read(&self.path).unwrap()
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the byte at `index` with `value`.
    #[allow(dead_code)]
    pub fn corrupt_byte(&self, index: usize, value: u8) {
        let mut data = self.read_all();
        data[index] = value;
        fs::write(&self.path, data).unwrap();
    }

    #[allow(dead_code)]
    pub fn truncate_last_bytes(&self, n: usize) {
        let data = self.read_all();
        let new_len = data.len().saturating_sub(n);
        fs::write(&self.path, &data[..new_len]).unwrap();
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Random payload where roughly `zero_ratio` of the bytes are zero.
    pub fn gen_payload(&mut self, len: usize, zero_ratio: f64) -> Vec<u8> {
        (0..len)
            .map(|_| {
                if self.rng.gen_bool(zero_ratio) {
                    0
                } else {
                    self.rng.gen_range(1..=255u8)
                }
            })
            .collect()
    }

    pub fn gen_mixed_payloads(&mut self, sizes: &[usize], zero_ratio: f64) -> Vec<Vec<u8>> {
        sizes
            .iter()
            .map(|&n| self.gen_payload(n, zero_ratio))
            .collect()
    }
}
