use brainys_render::{
    render, Choice, Document, ExportPanel, Grid, GridRow, Node, Row, Section, View, PLACEHOLDER_TEXT,
};
use brainys_sdk::{ExportFormat, ModuleType};
use pretty_assertions::assert_eq;

fn document(view: View) -> Document {
    match view {
        View::Document(document) => document,
        other => panic!("expected a document, got {other:?}"),
    }
}

fn titles(document: &Document) -> Vec<&str> {
    document
        .sections
        .iter()
        .map(|section| section.title.as_str())
        .collect()
}

const KISI_KISI: &str = r#"{"informasi_umum":{"nama_kisi_kisi":"Ulangan Harian"},"kisi_kisi":[{"nomor":1,"indikator_soal":"Siswa dapat...","no_soal":1}]}"#;

#[test]
fn renders_answer_key_blueprint() {
    let document = document(render(ModuleType::AnswerKeyBlueprint, KISI_KISI, None));

    assert_eq!(
        document.sections,
        vec![
            Section {
                path: "informasi_umum".to_string(),
                title: "Informasi Umum".to_string(),
                body: Node::Table(vec![Row::new(
                    "Nama Kisi-kisi",
                    Node::text("Ulangan Harian")
                )]),
            },
            Section {
                path: "kisi_kisi".to_string(),
                title: "Kisi-kisi".to_string(),
                body: Node::Grid(Grid {
                    headers: vec![
                        "Nomor".to_string(),
                        "Indikator Soal".to_string(),
                        "No Soal".to_string(),
                    ],
                    rows: vec![GridRow::Cells(vec![
                        Node::text("1"),
                        Node::text("Siswa dapat..."),
                        Node::text("1"),
                    ])],
                }),
            },
        ]
    );
    assert_eq!(document.export, None);
}

#[test]
fn empty_input_renders_only_placeholder() {
    assert_eq!(
        render(ModuleType::Syllabus, "", Some("s-1")),
        View::Placeholder(PLACEHOLDER_TEXT.to_string())
    );
    assert_eq!(
        render(ModuleType::Syllabus, "  \n", None),
        View::Placeholder(PLACEHOLDER_TEXT.to_string())
    );
    assert!(PLACEHOLDER_TEXT.starts_with("Belum ada hasil"));
}

#[test]
fn malformed_input_is_shown_verbatim() {
    assert_eq!(
        render(ModuleType::AnswerKeyBlueprint, "not json", Some("abc")),
        View::Raw("not json".to_string())
    );
    assert_eq!(
        render(ModuleType::LearningFlow, r#"{"alur": ["#, None),
        View::Raw(r#"{"alur": ["#.to_string())
    );
    assert_eq!(
        render(ModuleType::ExerciseSet, "[1, 2]", None),
        View::Raw("[1, 2]".to_string())
    );
}

#[test]
fn rendering_is_idempotent() {
    for module in ModuleType::ALL {
        assert_eq!(
            render(module, KISI_KISI, Some("id-1")),
            render(module, KISI_KISI, Some("id-1"))
        );
    }
}

#[test]
fn absent_and_blank_sections_are_omitted() {
    let json = r#"{
        "informasi_umum": {},
        "sarana_dan_prasarana": { "alat": "", "bahan": null },
        "pertanyaan_pemantik": [],
        "pemahaman_bermakna": { "inti": "Pecahan dipakai sehari-hari" }
    }"#;
    let document = document(render(ModuleType::TeachingModule, json, None));

    assert_eq!(titles(&document), vec!["Pemahaman Bermakna"]);
}

#[test]
fn export_buttons_follow_allow_list() {
    let expected = [
        (ModuleType::TeachingModule, vec![ExportFormat::Word, ExportFormat::Excel]),
        (ModuleType::Syllabus, vec![ExportFormat::Word]),
        (ModuleType::ExerciseSet, vec![ExportFormat::Word]),
        (ModuleType::TeachingMaterial, vec![ExportFormat::Word, ExportFormat::Ppt]),
        (ModuleType::GamifiedMaterial, vec![ExportFormat::Word, ExportFormat::Ppt]),
        (ModuleType::AnswerKeyBlueprint, vec![ExportFormat::Word, ExportFormat::Excel]),
        (ModuleType::LearningFlow, vec![ExportFormat::Word, ExportFormat::Excel]),
    ];

    for (module, formats) in expected {
        let document = document(render(module, "{}", Some("artifact-7")));
        assert_eq!(
            document.export,
            Some(ExportPanel {
                artifact_id: "artifact-7".to_string(),
                module,
                formats,
            })
        );
    }

    let document = document(render(ModuleType::Syllabus, "{}", Some("  ")));
    assert_eq!(document.export, None);
}

#[test]
fn teaching_module_labels_and_nested_paths() {
    let json = r#"{
        "informasi_umum": {
            "mata_pelajaran": "Matematika",
            "nama_modul_ajar": "Pecahan Senilai",
            "catatan_guru": "Gunakan media konkret"
        },
        "pertanyaan_pemantik": ["Apa itu pecahan?", "Di mana kita melihat pecahan?"],
        "lampiran": {
            "glosarium_materi": ["Pembilang: bilangan di atas garis"],
            "daftar_pustaka": ["Buku Matematika Kelas IV"]
        }
    }"#;
    let document = document(render(ModuleType::TeachingModule, json, Some("m-1")));

    assert_eq!(
        titles(&document),
        vec!["Informasi Umum", "Pertanyaan Pemantik", "Glosarium", "Daftar Pustaka"]
    );
    assert_eq!(
        document.sections[0].body,
        Node::Table(vec![
            Row::new("Nama Modul Ajar", Node::text("Pecahan Senilai")),
            Row::new("Mata Pelajaran", Node::text("Matematika")),
            Row::new("Catatan Guru", Node::text("Gunakan media konkret")),
        ])
    );
    assert_eq!(
        document.sections[1].body,
        Node::List(vec![
            Node::text("Apa itu pecahan?"),
            Node::text("Di mana kita melihat pecahan?"),
        ])
    );
    assert_eq!(document.sections[3].path, "lampiran.daftar_pustaka");
}

#[test]
fn nested_section_is_not_repeated_in_parent() {
    let json = r#"{
        "silabus_pembelajaran": {
            "mata_pelajaran": "IPA",
            "kompetensi_inti": ["KI-1", "KI-2"],
            "inti_silabus": [
                {
                    "kompetensi_dasar": ["3.1 Menerapkan konsep pengukuran"],
                    "materi_pembelajaran": ["Besaran pokok"],
                    "kegiatan_pembelajaran": ["Mengukur panjang meja"]
                }
            ]
        }
    }"#;
    let document = document(render(ModuleType::Syllabus, json, None));

    assert_eq!(
        titles(&document),
        vec!["Silabus Pembelajaran", "Inti Silabus"]
    );
    assert_eq!(
        document.sections[0].body,
        Node::Table(vec![
            Row::new("Mata Pelajaran", Node::text("IPA")),
            Row::new(
                "Kompetensi Inti",
                Node::List(vec![Node::text("KI-1"), Node::text("KI-2")])
            ),
        ])
    );
    assert_eq!(
        document.sections[1].body,
        Node::Grid(Grid {
            headers: vec![
                "Kompetensi Dasar".to_string(),
                "Materi Pembelajaran".to_string(),
                "Kegiatan Pembelajaran".to_string(),
            ],
            rows: vec![GridRow::Cells(vec![
                Node::List(vec![Node::text("3.1 Menerapkan konsep pengukuran")]),
                Node::List(vec![Node::text("Besaran pokok")]),
                Node::List(vec![Node::text("Mengukur panjang meja")]),
            ])],
        })
    );
}

#[test]
fn exercise_rows_are_numbered_and_tolerate_missing_cells() {
    let json = r#"{
        "soal_essay": [
            { "question": "Jelaskan fotosintesis!", "instructions": "Jawab singkat" },
            { "question": "Sebutkan bagian daun!" },
            "Soal bonus: gambarkan daun"
        ],
        "soal_pilihan_ganda": [
            { "question": "2 + 2 = ?", "options": { "a": "3", "b": "4" } }
        ]
    }"#;
    let document = document(render(ModuleType::ExerciseSet, json, None));

    assert_eq!(
        document.sections[0].body,
        Node::Grid(Grid {
            headers: vec![
                "No.".to_string(),
                "Pertanyaan".to_string(),
                "Instruksi".to_string(),
            ],
            rows: vec![
                GridRow::Cells(vec![
                    Node::text("1"),
                    Node::text("Jelaskan fotosintesis!"),
                    Node::text("Jawab singkat"),
                ]),
                GridRow::Cells(vec![
                    Node::text("2"),
                    Node::text("Sebutkan bagian daun!"),
                    Node::text(""),
                ]),
                GridRow::Span(Node::text("Soal bonus: gambarkan daun")),
            ],
        })
    );
    assert_eq!(document.sections[1].title, "Soal Pilihan Ganda");
}

#[test]
fn multiple_choice_questions_are_numbered_with_lettered_options() {
    let json = r#"{
        "soal_pilihan_ganda": [
            { "question": "2 + 2 = ?", "options": { "a": "3", "b": "4" } },
            {},
            { "question": "Ibu kota Indonesia?", "options": ["Bandung", "Jakarta"], "jawaban": "b" }
        ]
    }"#;
    let document = document(render(ModuleType::ExerciseSet, json, None));

    assert_eq!(
        document.sections[0].body,
        Node::Blocks(vec![
            Node::Choice(Choice {
                number: 1,
                question: Box::new(Node::text("2 + 2 = ?")),
                options: vec![
                    Row::new("a", Node::text("3")),
                    Row::new("b", Node::text("4")),
                ],
                details: vec![],
            }),
            Node::Choice(Choice {
                number: 2,
                question: Box::new(Node::text("Ibu kota Indonesia?")),
                options: vec![
                    Row::new("a", Node::text("Bandung")),
                    Row::new("b", Node::text("Jakarta")),
                ],
                details: vec![Row::new("Jawaban", Node::text("b"))],
            }),
        ])
    );
}

#[test]
fn mixed_arrays_flatten_objects_into_pairs() {
    let json = r#"{
        "informasi_umum": {
            "catatan": ["Kerja kelompok", { "durasi": "2 JP", "tempat": "Kelas" }, 3]
        }
    }"#;
    let document = document(render(ModuleType::LearningFlow, json, None));

    assert_eq!(
        document.sections[0].body,
        Node::Table(vec![Row::new(
            "Catatan",
            Node::List(vec![
                Node::text("Kerja kelompok"),
                Node::Pairs(vec![
                    Row::new("Durasi", Node::text("2 JP")),
                    Row::new("Tempat", Node::text("Kelas")),
                ]),
                Node::text("3"),
            ])
        )])
    );
}

#[test]
fn unexpected_shapes_fall_back_to_auto() {
    let json = r#"{ "kisi_kisi": "Belum tersedia", "informasi_umum": ["a", "b"] }"#;
    let document = document(render(ModuleType::AnswerKeyBlueprint, json, None));

    assert_eq!(
        document.sections[0].body,
        Node::List(vec![Node::text("a"), Node::text("b")])
    );
    assert_eq!(document.sections[1].body, Node::text("Belum tersedia"));
}

#[test]
fn teaching_material_uses_generic_sections() {
    let json = r#"{
        "id": 99,
        "judul_bahan_ajar": "Sistem Pencernaan",
        "tujuan_pembelajaran": ["Menjelaskan organ pencernaan"],
        "kosong": null
    }"#;
    let document = document(render(ModuleType::TeachingMaterial, json, Some("99")));

    assert_eq!(
        titles(&document),
        vec!["Judul Bahan Ajar", "Tujuan Pembelajaran"]
    );
    assert_eq!(document.sections[0].body, Node::text("Sistem Pencernaan"));
}
