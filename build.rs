use std::error::Error;
use std::{ fs, path::Path, path::PathBuf };
use serde_json::{ Value, Map };
use anyhow::Result;

fn main() -> Result<(), Box<dyn Error>> {
    let messages_dir = find_messages_directory()?;
    let out_path = Path::new(&std::env::var("OUT_DIR")?).join("all_translations.json");

    println!("cargo:rerun-if-changed={}", messages_dir.display());

    // Always create the file, even if empty, so include_str! works
    if !messages_dir.exists() {
        println!("cargo:warning=No messages/ folder found, bundling an empty catalog set");
        fs::write(out_path, "{}")?;
        return Ok(());
    }

    let catalogs = bundle_catalogs(&messages_dir)?;
    fs::write(out_path, serde_json::to_string_pretty(&catalogs)?)?;

    Ok(())
}

// messages/<locale>.json -> { "<locale>": { key: template } }
fn bundle_catalogs(messages_dir: &Path) -> Result<Value> {
    let mut catalogs = Map::new();

    for entry in fs::read_dir(messages_dir)? {
        let file_path = entry?.path();

        if let Some("json") = file_path.extension().and_then(|e| e.to_str()) {
            let locale = file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid catalog file name {:?}", file_path))?;

            let content = fs::read_to_string(&file_path)?;
            let json: Value = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("{}: {}", file_path.display(), e))?;
            if !json.is_object() {
                anyhow::bail!("{} is not a JSON object", file_path.display());
            }
            catalogs.insert(locale.to_string(), json);
        }
    }

    Ok(Value::Object(catalogs))
}

fn find_messages_directory() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("I18N_MESSAGES_DIR") {
        println!("cargo:rerun-if-env-changed=I18N_MESSAGES_DIR");
        return Ok(PathBuf::from(dir));
    }

    // The crate ships its own catalogs next to Cargo.toml
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let messages_path = Path::new(&manifest_dir).join("messages");
        if messages_path.exists() {
            return Ok(messages_path);
        }
    }

    // Otherwise walk up from the current directory
    let mut current = std::env::current_dir()?;
    loop {
        let messages_path = current.join("messages");
        if messages_path.exists() {
            return Ok(messages_path);
        }

        if !current.pop() {
            break;
        }
    }

    Ok(Path::new("messages").to_path_buf())
}
