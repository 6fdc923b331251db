//! Larger application: lookups, many-to-one child views and a many-to-many junction

use workframe::prelude::*;

fn lookup(name: &str, target: &str, display: &str) -> FieldSpec {
    FieldOptions::new(name).lookup(target).display(display).into()
}

fn build_registry() -> RegistryResult<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();

    // === MASTER DATA ===

    let customers = ModuleDefinition::new(
        "customers",
        vec![
            FieldSpec::from(FieldOptions::new("company_name").required()),
            FieldOptions::new("email").of_type("email").required().into(),
            FieldOptions::new("phone").of_type("phone").optional().into(),
            FieldOptions::new("customer_type")
                .enum_values(["Individual", "Small Business", "Enterprise"])
                .default_value("Individual")
                .into(),
            FieldOptions::new("credit_limit")
                .of_type("currency")
                .default_value(0)
                .into(),
            FieldOptions::new("payment_terms")
                .enum_values(["Net 15", "Net 30", "Net 60", "COD"])
                .default_value("Net 30")
                .into(),
            FieldOptions::new("is_active")
                .of_type("boolean")
                .default_value(true)
                .into(),
        ],
    )?;

    let suppliers = ModuleDefinition::new(
        "suppliers",
        vec![
            FieldSpec::from(FieldOptions::new("company_name").required()),
            FieldOptions::new("email").of_type("email").required().into(),
            FieldOptions::new("quality_rating")
                .enum_values(["Excellent", "Good", "Fair", "Poor"])
                .optional()
                .into(),
            FieldOptions::new("is_preferred")
                .of_type("boolean")
                .default_value(false)
                .into(),
        ],
    )?;

    let products = ModuleDefinition::new(
        "products",
        vec![
            FieldSpec::from(FieldOptions::new("sku").required().placeholder("PROD-001")),
            FieldOptions::new("name").required().into(),
            lookup("supplier", "suppliers", "company_name"),
            FieldOptions::new("cost_price")
                .of_type("currency")
                .required()
                .into(),
            FieldOptions::new("stock_quantity").default_value(0).into(),
            FieldOptions::new("created_date")
                .of_type("datetime")
                .readonly()
                .hidden_in_form()
                .into(),
        ],
    )?;

    // === OPERATIONS ===

    let sales_orders = ModuleDefinition::new(
        "sales_orders",
        vec![
            FieldSpec::from(FieldOptions::new("order_number").required().placeholder("SO-001")),
            lookup("customer", "customers", "company_name"),
            FieldOptions::new("order_date").of_type("date").required().into(),
            FieldOptions::new("status")
                .enum_values(["Draft", "Confirmed", "Shipped", "Delivered", "Cancelled"])
                .default_value("Draft")
                .into(),
            FieldOptions::new("total_amount")
                .of_type("currency")
                .readonly()
                .hidden_in_form()
                .into(),
        ],
    )?;

    // === LINKED TABLES ===

    let customer_contacts = ModuleDefinition::with_relationship(
        "contacts",
        vec![
            FieldSpec::from(FieldOptions::new("first_name").required()),
            FieldOptions::new("last_name").required().into(),
            FieldOptions::new("email").of_type("email").required().into(),
            FieldOptions::new("is_primary")
                .of_type("boolean")
                .default_value(false)
                .into(),
        ],
        RelationshipMarkers::many_to_one("customers"),
    )?;

    // === HUMAN RESOURCES ===

    let employees = ModuleDefinition::new(
        "employees",
        vec![
            FieldSpec::from(FieldOptions::new("employee_id").required().placeholder("EMP-001")),
            FieldOptions::new("first_name").required().into(),
            FieldOptions::new("hire_date").of_type("date").required().into(),
            FieldOptions::new("manager")
                .lookup("employees")
                .display("first_name")
                .optional()
                .into(),
        ],
    )?;

    let roles = ModuleDefinition::new(
        "roles",
        vec![
            FieldSpec::from(FieldOptions::new("role_name").required()),
            FieldOptions::new("is_management")
                .of_type("boolean")
                .default_value(false)
                .into(),
        ],
    )?;

    let employee_roles = ModuleDefinition::with_relationship(
        "employee_roles",
        Vec::<FieldSpec>::new(),
        RelationshipMarkers::many_to_many("roles"),
    )?;

    let mounts = [
        ("/customers", customers, "Customers", "bi-people-fill"),
        ("/suppliers", suppliers, "Suppliers", "bi-truck"),
        ("/products", products, "Products", "bi-box-seam"),
        ("/sales-orders", sales_orders, "Sales Orders", "bi-cart-check"),
        ("/customer-contacts", customer_contacts, "Customer Contacts", "bi-person-vcard"),
        ("/employees", employees, "Employees", "bi-person-badge"),
        ("/roles", roles, "Roles", "bi-diagram-3"),
        ("/employee-roles", employee_roles, "Employee Roles", "bi-person-gear"),
    ];
    for (path, module, title, icon) in mounts {
        registry.register_with(path, module, Navigation::new().title(title).icon(icon))?;
    }

    registry.finalize()?;
    Ok(registry)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🏭 Workframe ERP System");
    println!("=======================\n");

    let registry = build_registry()?;

    println!("📋 Navigation:");
    println!("{}\n", serde_json::to_string_pretty(&registry.navigation())?);

    for mounted in registry.iter() {
        let module = mounted.module();
        let views = registry
            .nested_views(module.name())
            .unwrap_or_default();

        println!(
            "{} ({} fields, {} in edit form)",
            mounted.path(),
            module.fields().len(),
            module.fields_for(View::Edit).len()
        );
        for child in &views.children {
            println!("   ↳ child view {} at {}", child.module, child.path);
        }
        for peer in &views.peers {
            println!("   ↔ paired with {} through {}", peer.module, peer.junction);
        }
        for referrer in registry.referrers_of(module.name()) {
            println!("   ← referenced by {}.{}", referrer.module, referrer.field);
        }
    }

    Ok(())
}
