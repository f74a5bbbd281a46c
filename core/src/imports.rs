//! # Import Collection

use crate::config::Namespace;
use crate::ir::Field;
use std::collections::BTreeSet;

/// Import paths needed by `fields`, sorted and deduplicated, without `own`.
pub fn collect_imports(fields: &[Field], own: &Namespace) -> Vec<String> {
    let all: BTreeSet<String> = fields.iter().flat_map(|f| f.ty.imports()).collect();
    all.into_iter()
        .filter(|path| !path.is_empty() && *path != own.import_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TargetType;
    use crate::type_mapping::enum_type;
    use crate::schema::EnumKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorted_deduplicated_excluding_own() {
        let enums = Namespace::from_import_path("github.com/kalo-build/dummy/enums");
        let models = Namespace::from_import_path("github.com/kalo-build/dummy/models");
        let fields = vec![
            Field::new("UpdatedAt", TargetType::time()),
            Field::new("Nationality", enum_type(&enums, "Nationality", EnumKind::String)),
            Field::new("CreatedAt", TargetType::pointer(TargetType::time())),
            Field::new(
                "Self",
                TargetType::StructRef {
                    namespace: models.clone(),
                    name: "Person".into(),
                },
            ),
            Field::new("Persons", TargetType::slice(TargetType::local_struct("Person"))),
        ];

        assert_eq!(
            collect_imports(&fields, &models),
            vec!["github.com/kalo-build/dummy/enums", "time"]
        );
    }
}
