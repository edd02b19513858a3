use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";
const REQUIRED_SECTIONS: &[&str] = &["site", "render"];

fn main() {
    println!("cargo:rerun-if-changed={}", DEFAULT_CONFIG);

    let content = fs::read_to_string(DEFAULT_CONFIG).expect("Failed to read default_config.toml");

    // Catch syntax errors before they become a silent fallback at runtime
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for section in REQUIRED_SECTIONS {
        if !table.get(*section).is_some_and(toml::Value::is_table) {
            panic!("default_config.toml is missing the [{}] section", section);
        }
    }
}
