/// Normalizes a child's remote object name into its relationship form.
///
/// Custom objects are declared with a `__c` suffix but traversed through
/// their `__r` relationship, so `Project__c` becomes `Project__r`. Any other
/// name is already usable as a relationship and is returned unchanged.
pub fn relationship_name(object: &str) -> String {
    match object.strip_suffix("__c") {
        Some(stem) => format!("{stem}__r"),
        None => object.to_string(),
    }
}
