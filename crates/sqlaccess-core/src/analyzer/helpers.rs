//! Identifier and name helpers shared by the walker.

use crate::types::CaseSensitivity;
use sqlparser::ast::{ColumnDef, Ident, ObjectName, ViewColumnDef};

/// Normalizes one identifier. Quoted identifiers are kept verbatim.
pub(crate) fn ident_value(ident: &Ident, case: CaseSensitivity) -> String {
    if ident.quote_style.is_some() {
        ident.value.clone()
    } else {
        case.fold(&ident.value)
    }
}

/// Normalized identifier parts of an object name, skipping non-identifier parts.
pub(crate) fn object_name_parts(name: &ObjectName, case: CaseSensitivity) -> Vec<String> {
    name.0
        .iter()
        .filter_map(|part| part.as_ident())
        .map(|ident| ident_value(ident, case))
        .collect()
}

/// Splits an object name into `(qualifier, name)`: the last part and the part
/// before it. The qualifier is empty for single-part names.
pub(crate) fn split_object_name(name: &ObjectName, case: CaseSensitivity) -> (String, String) {
    split_parts(object_name_parts(name, case))
}

/// Splits a compound identifier such as `db.t.col` into `("t", "col")`.
pub(crate) fn split_idents(idents: &[Ident], case: CaseSensitivity) -> (String, String) {
    split_parts(idents.iter().map(|ident| ident_value(ident, case)).collect())
}

/// A node that names a column directly rather than through a column reference
/// expression (`INSERT` column lists, `USING (...)`, column definitions).
pub(crate) trait BareColumn {
    fn bare_column(&self, case: CaseSensitivity) -> String;
}

impl BareColumn for Ident {
    fn bare_column(&self, case: CaseSensitivity) -> String {
        ident_value(self, case)
    }
}

impl BareColumn for ObjectName {
    fn bare_column(&self, case: CaseSensitivity) -> String {
        split_object_name(self, case).1
    }
}

impl BareColumn for ColumnDef {
    fn bare_column(&self, case: CaseSensitivity) -> String {
        ident_value(&self.name, case)
    }
}

impl BareColumn for ViewColumnDef {
    fn bare_column(&self, case: CaseSensitivity) -> String {
        ident_value(&self.name, case)
    }
}

fn split_parts(mut parts: Vec<String>) -> (String, String) {
    let name = parts.pop().unwrap_or_default();
    let qualifier = parts.pop().unwrap_or_default();
    (qualifier, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlparser::ast::ObjectNamePart;

    fn name(parts: &[&str]) -> ObjectName {
        ObjectName(
            parts
                .iter()
                .map(|p| ObjectNamePart::Identifier(Ident::new(*p)))
                .collect(),
        )
    }

    #[test]
    fn quoted_identifiers_are_not_folded() {
        let quoted = Ident::with_quote('"', "MixedCase");
        assert_eq!(ident_value(&quoted, CaseSensitivity::Lower), "MixedCase");
        assert_eq!(
            ident_value(&Ident::new("MixedCase"), CaseSensitivity::Lower),
            "mixedcase"
        );
    }

    #[test]
    fn split_object_name_uses_last_two_parts() {
        assert_eq!(
            split_object_name(&name(&["db", "sales", "orders"]), CaseSensitivity::Exact),
            ("sales".to_string(), "orders".to_string())
        );
        assert_eq!(
            split_object_name(&name(&["orders"]), CaseSensitivity::Exact),
            (String::new(), "orders".to_string())
        );
    }

    #[test]
    fn split_idents_of_compound_column() {
        let idents = vec![Ident::new("u"), Ident::new("id")];
        assert_eq!(
            split_idents(&idents, CaseSensitivity::Upper),
            ("U".to_string(), "ID".to_string())
        );
    }
}
