use brainys_render::{render, render_html, render_html_with};
use brainys_sdk::{ExportLoading, ModuleType};

const KISI_KISI: &str = r#"{"informasi_umum":{"nama_kisi_kisi":"Ulangan Harian"},"kisi_kisi":[{"nomor":1,"indikator_soal":"Siswa dapat...","no_soal":1}]}"#;

#[test]
fn document_html_contains_sections_and_buttons() {
    let html = render_html(&render(
        ModuleType::AnswerKeyBlueprint,
        KISI_KISI,
        Some("abc"),
    ));

    assert!(html.contains("Informasi Umum"), "{html}");
    assert!(html.contains("Nama Kisi-kisi"));
    assert!(html.contains("Ulangan Harian"));
    assert_eq!(html.matches("<section").count(), 2);
    assert!(html.contains("Indikator Soal"));
    assert!(html.contains("Siswa dapat..."));

    assert!(html.contains(r#"data-format="word""#));
    assert!(html.contains(r#"data-format="excel""#));
    assert!(!html.contains(r#"data-format="ppt""#));
    assert!(html.contains(r#"data-artifact-id="abc""#));
    assert!(html.contains("Export Word"));
    assert!(!html.contains("disabled"));
}

#[test]
fn in_flight_buttons_are_disabled() {
    let view = render(ModuleType::GamifiedMaterial, "{}", Some("g-1"));
    let html = render_html_with(
        &view,
        &ExportLoading {
            ppt: true,
            ..ExportLoading::default()
        },
    );

    assert!(html.contains("Export Word"));
    assert!(!html.contains("Export PPT"));
    assert!(html.contains("Loading..."));
    assert_eq!(html.matches("disabled").count(), 1);
}

#[test]
fn placeholder_and_raw_containers() {
    let html = render_html(&render(ModuleType::Syllabus, "", None));
    assert!(html.contains("output-placeholder"));
    assert!(html.contains("Belum ada hasil. Silakan isi form di samping dan klik Generate."));
    assert!(!html.contains("<button"));

    let html = render_html(&render(ModuleType::Syllabus, "not json", Some("s-1")));
    assert!(html.contains("output-raw"));
    assert!(html.contains("not json"));
    assert!(!html.contains("<button"));
}

#[test]
fn payload_text_is_escaped() {
    let html = render_html(&render(
        ModuleType::TeachingMaterial,
        r#"{"judul": "<script>alert(1)</script>"}"#,
        None,
    ));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script"));

    let html = render_html(&render(ModuleType::TeachingMaterial, "<b>raw</b>", None));
    assert!(!html.contains("<b>"));
}

#[test]
fn multiple_choice_html_shows_numbers_and_options() {
    let html = render_html(&render(
        ModuleType::ExerciseSet,
        r#"{"soal_pilihan_ganda":[{"question":"2 + 2 = ?","options":{"a":"3","b":"4"}}]}"#,
        None,
    ));

    assert!(html.contains("1."), "{html}");
    assert!(html.contains("2 + 2 = ?"));
    assert!(html.contains("a. "));
    assert!(html.contains("b. "));
    assert!(!html.contains("Question"));
    assert!(!html.contains("Options"));
}
