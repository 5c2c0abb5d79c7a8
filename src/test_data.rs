use std::path::PathBuf;

/// One-minute observations from Ames, Iowa (AMW) used as a fixture.
pub fn example_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("AMW_example_data.csv")
}
