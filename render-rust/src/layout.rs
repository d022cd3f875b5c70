//! Curated section layouts per module type.

use brainys_sdk::ModuleType;

/// `(payload key, display label)`.
pub type Field = (&'static str, &'static str);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Shape-driven rendering of whatever the value is.
    Auto,
    /// Label/value table with explicit labels, in this order.
    Fields(&'static [Field]),
    /// Array of objects as a grid with fixed columns.
    Rows {
        numbered: bool,
        columns: &'static [Field],
    },
    /// Array of numbered multiple-choice questions.
    Choices {
        question: &'static str,
        options: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    /// Top-level key, or a dotted path such as `lampiran.daftar_pustaka`.
    pub path: &'static str,
    pub title: &'static str,
    pub layout: Layout,
}

const fn section(path: &'static str, title: &'static str, layout: Layout) -> SectionSpec {
    SectionSpec {
        path,
        title,
        layout,
    }
}

const INFORMASI_UMUM: &str = "Informasi Umum";

const TEACHING_MODULE_INFO: &[Field] = &[
    ("nama_modul_ajar", "Nama Modul Ajar"),
    ("penyusun", "Nama Penyusun"),
    ("jenjang_sekolah", "Satuan Pendidikan"),
    ("fase_kelas", "Fase/Kelas"),
    ("mata_pelajaran", "Mata Pelajaran"),
    ("alokasi_waktu", "Alokasi Waktu"),
    ("kompetensi_awal", "Kompetensi Awal"),
    ("profil_pelajar_pancasila", "Profil Pelajar Pancasila"),
    ("target_peserta_didik", "Target Peserta Didik"),
    ("model_pembelajaran", "Model Pembelajaran"),
    ("element", "Elemen"),
    ("capaian_pembelajaran", "Capaian Pembelajaran"),
];

const TEACHING_MODULE: &[SectionSpec] = &[
    section("informasi_umum", INFORMASI_UMUM, Layout::Fields(TEACHING_MODULE_INFO)),
    section("sarana_dan_prasarana", "Sarana dan Prasarana", Layout::Auto),
    section(
        "tujuan_kegiatan_pembelajaran",
        "Tujuan Kegiatan Pembelajaran",
        Layout::Auto,
    ),
    section("pemahaman_bermakna", "Pemahaman Bermakna", Layout::Auto),
    section("pertanyaan_pemantik", "Pertanyaan Pemantik", Layout::Auto),
    section("kompetensi_dasar", "Kegiatan Pembelajaran", Layout::Auto),
    section("langkah_pembelajaran", "Langkah Pembelajaran", Layout::Auto),
    section("lampiran.glosarium_materi", "Glosarium", Layout::Auto),
    section("lampiran.daftar_pustaka", "Daftar Pustaka", Layout::Auto),
];

const SYLLABUS: &[SectionSpec] = &[
    section("informasi_umum", INFORMASI_UMUM, Layout::Auto),
    section(
        "silabus_pembelajaran",
        "Silabus Pembelajaran",
        Layout::Fields(&[
            ("mata_pelajaran", "Mata Pelajaran"),
            ("tingkat_kelas", "Tingkat Kelas"),
            ("alokasi_waktu", "Alokasi Waktu"),
            ("kompetensi_inti", "Kompetensi Inti"),
            ("definisi_kompetensi_inti", "Definisi Kompetensi Inti"),
        ]),
    ),
    section(
        "silabus_pembelajaran.inti_silabus",
        "Inti Silabus",
        Layout::Rows {
            numbered: false,
            columns: &[
                ("kompetensi_dasar", "Kompetensi Dasar"),
                ("materi_pembelajaran", "Materi Pembelajaran"),
                ("kegiatan_pembelajaran", "Kegiatan Pembelajaran"),
            ],
        },
    ),
];

const EXERCISE_SET: &[SectionSpec] = &[
    section(
        "informasi_umum",
        INFORMASI_UMUM,
        Layout::Fields(&[
            ("nama_latihan", "Nama Soal Latihan"),
            ("penyusun", "Nama Penyusun"),
            ("instansi", "Satuan Pendidikan"),
            ("fase_kelas", "Fase/Kelas"),
            ("mata_pelajaran", "Mata Pelajaran"),
            ("kompetensi_awal", "Kompetensi Awal"),
            ("element", "Elemen Capaian"),
            ("capaian_pembelajaran", "Capaian Pembelajaran"),
            ("topik", "Topik"),
        ]),
    ),
    section(
        "soal_essay",
        "Soal Essay",
        Layout::Rows {
            numbered: true,
            columns: &[("question", "Pertanyaan"), ("instructions", "Instruksi")],
        },
    ),
    section(
        "soal_pilihan_ganda",
        "Soal Pilihan Ganda",
        Layout::Choices {
            question: "question",
            options: "options",
        },
    ),
];

const GAMIFIED_MATERIAL: &[SectionSpec] = &[
    section("informasi_umum", INFORMASI_UMUM, Layout::Auto),
    section(
        "informasi_gamifikasi",
        "Informasi Gamifikasi",
        Layout::Fields(&[
            ("tema", "Tema"),
            ("konsep_utama", "Konsep Utama"),
            ("skema_game", "Skema Game"),
        ]),
    ),
    section(
        "elemen_gamifikasi",
        "Elemen Gamifikasi",
        Layout::Rows {
            numbered: false,
            columns: &[("judul", "Judul"), ("deskripsi", "Deskripsi")],
        },
    ),
    section(
        "misi_dan_tantangan",
        "Misi dan Tantangan",
        Layout::Rows {
            numbered: false,
            columns: &[("jenis", "Jenis"), ("deskripsi", "Deskripsi"), ("poin", "Poin")],
        },
    ),
    section(
        "langkah_implementasi",
        "Langkah Implementasi",
        Layout::Rows {
            numbered: false,
            columns: &[
                ("langkah", "Langkah"),
                ("judul", "Judul"),
                ("deskripsi", "Deskripsi"),
            ],
        },
    ),
];

const ANSWER_KEY_BLUEPRINT: &[SectionSpec] = &[
    section(
        "informasi_umum",
        INFORMASI_UMUM,
        Layout::Fields(&[
            ("nama_kisi_kisi", "Nama Kisi-kisi"),
            ("penyusun", "Nama Penyusun"),
            ("instansi", "Satuan Pendidikan"),
            ("kelas", "Fase/Kelas"),
            ("mata_pelajaran", "Mata Pelajaran"),
            ("alokasi_waktu", "Alokasi Waktu"),
            ("kompetensi_awal", "Kompetensi Awal"),
            ("elemen_capaian", "Elemen Capaian"),
            ("capaian_pembelajaran_redaksi", "Capaian Pembelajaran"),
            ("pokok_materi", "Pokok Materi"),
            ("tahun_penyusunan", "Tahun Penyusunan"),
        ]),
    ),
    section(
        "kisi_kisi",
        "Kisi-kisi",
        Layout::Rows {
            numbered: false,
            columns: &[
                ("nomor", "Nomor"),
                ("indikator_soal", "Indikator Soal"),
                ("no_soal", "No Soal"),
            ],
        },
    ),
];

const LEARNING_FLOW: &[SectionSpec] = &[
    section("informasi_umum", INFORMASI_UMUM, Layout::Auto),
    section(
        "alur",
        "Alur Tujuan Pembelajaran",
        Layout::Rows {
            numbered: false,
            columns: &[
                ("no", "No"),
                ("tujuan_pembelajaran", "Tujuan Pembelajaran"),
                ("kata_frase_kunci", "Kata/Frase Kunci"),
                ("profil_pelajar_pancasila", "Profil Pelajar Pancasila"),
                ("glosarium", "Glosarium"),
            ],
        },
    ),
];

/// The curated layout of `module`, or `None` when its payload is rendered
/// generically.
#[must_use]
pub fn module_layout(module: ModuleType) -> Option<&'static [SectionSpec]> {
    match module {
        ModuleType::TeachingModule => Some(TEACHING_MODULE),
        ModuleType::Syllabus => Some(SYLLABUS),
        ModuleType::ExerciseSet => Some(EXERCISE_SET),
        ModuleType::GamifiedMaterial => Some(GAMIFIED_MATERIAL),
        ModuleType::AnswerKeyBlueprint => Some(ANSWER_KEY_BLUEPRINT),
        ModuleType::LearningFlow => Some(LEARNING_FLOW),
        ModuleType::TeachingMaterial => None,
    }
}

/// Direct child keys of `path` that another section of `layout` renders on
/// its own.
pub(crate) fn claimed_keys<'a>(
    layout: &'a [SectionSpec],
    path: &'a str,
) -> impl Iterator<Item = &'static str> + 'a {
    layout.iter().filter_map(move |spec| {
        spec.path
            .strip_prefix(path)
            .and_then(|rest| rest.strip_prefix('.'))
            .map(|rest| rest.split('.').next().unwrap_or(rest))
    })
}
