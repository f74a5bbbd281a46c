//! Compiles the fixture registry end to end and compares the written files
//! against hand-checked Go sources.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use structgen_core::config::{CompileConfig, EnumSectionConfig, StructSectionConfig};
use structgen_core::emit::{EnumFileWriter, GoEnumWriter, GoStructWriter, StructFileWriter};
use structgen_core::{
    compile_all_entities, compile_all_enums, compile_all_models, compile_all_structures,
    AppError, NoHooks, Registry,
};
use tempfile::tempdir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn config() -> CompileConfig {
    CompileConfig {
        models: StructSectionConfig::new("github.com/kalo-build/dummy/models", "m"),
        enums: EnumSectionConfig::new("github.com/kalo-build/dummy/enums"),
        structures: StructSectionConfig::new("github.com/kalo-build/dummy/structures", "s"),
        entities: StructSectionConfig::new("github.com/kalo-build/dummy/entities", "e"),
    }
}

fn compile_into(out: &Path) -> Result<(), AppError> {
    let config = config();
    let registry = Registry::load_from_dir(fixtures().join("registry"))?;

    let enums = EnumFileWriter::new(out.join("enums"));
    for ir in compile_all_enums(&config, &registry, &NoHooks)?.values() {
        enums.write_enum(ir, &NoHooks)?;
    }

    let models = StructFileWriter::new(out.join("models"));
    for ir in compile_all_models(&config, &registry, &NoHooks)?.values().flatten() {
        models.write_struct(ir, &NoHooks)?;
    }

    let structures = StructFileWriter::new(out.join("structures"));
    for ir in compile_all_structures(&config, &registry, &NoHooks)?.values() {
        structures.write_struct(ir, &NoHooks)?;
    }

    let entities = StructFileWriter::new(out.join("entities"));
    for ir in compile_all_entities(&config, &registry, &NoHooks)?.values().flatten() {
        entities.write_struct(ir, &NoHooks)?;
    }
    Ok(())
}

#[test]
fn test_fixture_registry_matches_golden_files() {
    let dir = tempdir().unwrap();
    compile_into(dir.path()).unwrap();

    let golden = fixtures().join("golden");
    let mut checked = 0;
    for section in ["enums", "models", "structures", "entities"] {
        let mut entries: Vec<_> = fs::read_dir(golden.join(section))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        entries.sort();

        for expected_path in entries {
            let file_name = expected_path.file_name().unwrap();
            let actual_path = dir.path().join(section).join(file_name);
            let expected = fs::read_to_string(&expected_path).unwrap();
            let actual = fs::read_to_string(&actual_path)
                .unwrap_or_else(|e| panic!("{} was not written: {}", actual_path.display(), e));
            assert_eq!(actual, expected, "{}/{:?}", section, file_name);
            checked += 1;
        }
    }
    assert_eq!(checked, 12);
}

#[test]
fn test_every_identifier_gets_its_own_file() {
    let dir = tempdir().unwrap();
    compile_into(dir.path()).unwrap();

    let mut models: Vec<String> = fs::read_dir(dir.path().join("models"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    models.sort();

    assert_eq!(
        models,
        vec![
            "comment.go",
            "comment_id_primary.go",
            "company.go",
            "company_id_name.go",
            "company_id_primary.go",
            "contact.go",
            "contact_id_primary.go",
            "contact_info.go",
            "contact_info_id_email.go",
            "contact_info_id_primary.go",
            "person.go",
            "person_id_name.go",
            "person_id_primary.go",
        ]
    );
}

#[test]
fn test_concurrent_compiles_agree() {
    let config = config();
    let registry = Registry::load_from_dir(fixtures().join("registry")).unwrap();

    let (left, right) = std::thread::scope(|scope| {
        let a = scope.spawn(|| compile_all_models(&config, &registry, &NoHooks).unwrap());
        let b = scope.spawn(|| compile_all_models(&config, &registry, &NoHooks).unwrap());
        (a.join().unwrap(), b.join().unwrap())
    });

    assert_eq!(left, right);
    assert_eq!(left, compile_all_models(&config, &registry, &NoHooks).unwrap());
}

#[test]
fn test_camel_casing_adds_json_tags() {
    let mut config = config();
    config.models = config.models.clone().with_casing("camel");
    let registry = Registry::load_from_dir(fixtures().join("registry")).unwrap();

    let compiled = compile_all_models(&config, &registry, &NoHooks).unwrap();
    let contact = &compiled["Contact"][0];
    let rendered = structgen_core::render_struct(contact).unwrap();

    assert!(rendered.contains("\tEmail string `json:\"email\"`\n"));
    assert!(rendered.contains("\tID    uint   `json:\"id\"`\n"));
}
