//! Load an application from a YAML manifest
//!
//! ```sh
//! cargo run --example manifest -- demos/business.yaml
//! ```

use workframe::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/business.yaml".to_string());

    let config = AppConfig::from_yaml_file(&path)?;
    let registry = match config.build_registry() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("❌ {} [{}]", err, err.error_code());
            std::process::exit(1);
        }
    };

    println!("✅ {} ({} modules)", config.app_name, registry.len());
    if let Some(description) = &config.app_description {
        println!("   {}", description);
    }

    for mounted in registry.iter() {
        let module = mounted.module();
        println!("\n{} {}", mounted.path(), mounted.navigation().title);
        println!("{}", serde_json::to_string_pretty(&module.fields_for(View::Edit))?);
    }

    Ok(())
}
