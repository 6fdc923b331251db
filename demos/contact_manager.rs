//! Simplest application: one module declared with bare field names

use workframe::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("📇 Workframe Contact Manager\n");

    // Bare names: "email" is detected as an email field, the rest are text
    let contacts = ModuleDefinition::new("contacts", ["name", "email", "phone", "company"])?;

    let mut registry = ModuleRegistry::new();
    registry.register_with(
        "/contacts",
        contacts,
        Navigation::new()
            .title("Contacts")
            .icon("bi-person-lines-fill"),
    )?;
    registry.finalize()?;

    for entry in registry.navigation() {
        println!("{} -> {}", entry.title, entry.path);
    }

    let contacts = registry.get("/contacts").expect("registered above");
    for field in contacts.fields_for(View::Edit) {
        println!("  {:<10} {}", field.name(), field.field_type());
    }

    Ok(())
}
