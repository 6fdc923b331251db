//! Display names derived from module and field identifiers

/// Turn a snake_case or kebab-case identifier into a title
///
/// ```
/// use workframe::core::naming::humanize;
///
/// assert_eq!(humanize("sales_orders"), "Sales Orders");
/// assert_eq!(humanize("employee-roles"), "Employee Roles");
/// assert_eq!(humanize("is_active"), "Is Active");
/// ```
pub fn humanize(identifier: &str) -> String {
    identifier
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a plural noun to its singular form
///
/// Only the final word of a compound identifier is affected.
///
/// ```
/// use workframe::core::naming::singularize;
///
/// assert_eq!(singularize("companies"), "company");
/// assert_eq!(singularize("addresses"), "address");
/// assert_eq!(singularize("sales_orders"), "sales_order");
/// ```
pub fn singularize(plural: &str) -> String {
    match plural {
        "" => String::new(),

        // Words ending in ies -> y
        s if s.ends_with("ies") && s.len() > 3 => format!("{}y", &s[..s.len() - 3]),

        // Sibilant endings drop "es"
        s if s.len() > 4
            && (s.ends_with("sses")
                || s.ends_with("shes")
                || s.ends_with("ches")
                || s.ends_with("xes")) =>
        {
            s[..s.len() - 2].to_string()
        }

        s if s.ends_with("ss") => s.to_string(),

        s if s.ends_with('s') && s.len() > 1 => s[..s.len() - 1].to_string(),

        s => s.to_string(),
    }
}

/// Singular, human-readable label for one record of a module
///
/// ```
/// use workframe::core::naming::record_label;
///
/// assert_eq!(record_label("companies"), "Company");
/// assert_eq!(record_label("purchase_orders"), "Purchase Order");
/// ```
pub fn record_label(module_name: &str) -> String {
    humanize(&singularize(module_name))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("contacts"), "Contacts");
        assert_eq!(humanize("first_name"), "First Name");
        assert_eq!(humanize("__double__underscore"), "Double Underscore");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_singularize_regular() {
        assert_eq!(singularize("contacts"), "contact");
        assert_eq!(singularize("roles"), "role");
        assert_eq!(singularize("purchases"), "purchase");
    }

    #[test]
    fn test_singularize_special_endings() {
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("branches"), "branch");
        assert_eq!(singularize("business"), "business");
    }

    #[test]
    fn test_singularize_leaves_singulars_alone() {
        assert_eq!(singularize("staff"), "staff");
        assert_eq!(singularize("s"), "s");
        assert_eq!(singularize(""), "");
    }

    #[test]
    fn test_record_label() {
        assert_eq!(record_label("customers"), "Customer");
        assert_eq!(record_label("employee_roles"), "Employee Role");
    }
}
