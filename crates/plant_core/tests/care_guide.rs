use std::fs;
use std::path::PathBuf;

use plant_core::{CareGuide, ExportError, Field};
use tempfile::tempdir;

fn write_file(path: &PathBuf, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write fixture");
}

#[test]
fn embedded_guide_lists_looks_up_and_exports() {
    let temp = tempdir().expect("tempdir");
    let guide = CareGuide::builder()
        .export_dir(temp.path())
        .build()
        .expect("build care guide");

    let names = guide.list_names(false);
    assert!(names.iter().any(|name| name == "Boston Fern"));
    let safe = guide.list_names(true);
    assert!(safe.iter().all(|name| names.contains(name)));
    assert!(!safe.iter().any(|name| name == "Pothos"));

    let schedule = guide.schedule("Boston Fern").expect("boston fern");
    assert_eq!(schedule.line(Field::Water), Some("Water every 3 days."));
    assert_eq!(schedule.line(Field::Mist), Some("Mist every 2 days."));

    let path = guide.export_pdf("Boston Fern").expect("export");
    assert_eq!(path, temp.path().join("Boston_Fern_schedule.pdf"));
    let bytes = fs::read(&path).expect("read export");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn export_without_valid_plant_writes_nothing() {
    let temp = tempdir().expect("tempdir");
    let guide = CareGuide::builder()
        .export_dir(temp.path())
        .build()
        .expect("build care guide");

    let err = guide.export_pdf("Unknown Plant").unwrap_err();
    assert!(matches!(err, ExportError::NoValidSelection));
    assert_eq!(err.to_string(), "Please choose a valid plant.");
    assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 0);
}

#[test]
fn catalog_file_overrides_embedded_dataset() {
    let temp = tempdir().expect("tempdir");
    let catalog_file = temp.path().join("data").join("plants.json");
    write_file(
        &catalog_file,
        r#"{
            "Pothos": {"wateringDays": 7, "mistingDays": null, "repotMonths": 24,
                "temperature": "65-85°F", "soilType": "Well-draining", "toxicity": "Toxic"}
        }"#,
    );

    let guide = CareGuide::builder()
        .catalog_path(&catalog_file)
        .export_dir(temp.path())
        .build()
        .expect("build care guide");

    assert_eq!(guide.list_names(false), vec!["Pothos"]);
    assert!(guide.list_names(true).is_empty());
    assert_eq!(
        guide.schedule("Pothos").expect("pothos").texts(),
        vec![
            "Water every 7 days.",
            "Repot every 24 months.",
            "Ideal temperature: 65-85°F",
            "Soil type: Well-draining",
            "Toxicity: Toxic",
        ]
    );
    assert!(guide.schedule("Unknown Plant").is_none());
}

#[test]
fn malformed_catalog_file_fails_to_build() {
    let temp = tempdir().expect("tempdir");
    let catalog_file = temp.path().join("plants.json");
    write_file(
        &catalog_file,
        r#"{"Cactus": {"wateringDays": 30, "mistingDays": "rarely",
            "temperature": "70°F", "soilType": "Sand", "toxicity": "Non-toxic"}}"#,
    );

    let result = CareGuide::builder().catalog_path(&catalog_file).build();
    let err = result.err().expect("malformed catalog rejected");
    assert!(format!("{err:#}").contains("failed to load catalog"));
}
