//! Static header synonym table.
//!
//! Maps each canonical field to the normalized header spellings seen across
//! results sheets. Two generations of sheets are covered: the legacy
//! single-name layout (num/nom/moyenne style headers) and the current
//! bilingual layout (nodoss/nom_fr/nom_ar/moy_bac style), in English, French
//! and Arabic. Entries are already in normalized form (lowercase,
//! underscores, no combining marks); membership checks run on
//! [`normalize_header`](super::header::normalize_header) output.
//!
//! Variant sets are pairwise disjoint across fields. Column mapping is
//! order-independent only under that condition, and a test enforces it.

use crate::record::Field;

/// Accepted normalized spellings for a canonical field.
pub fn variants(field: Field) -> &'static [&'static str] {
    match field {
        Field::Dossier => &[
            "nodoss",
            "num",
            "numero",
            "number",
            "num_bepc",
            "code",
            "id",
            "dossier",
            "numero_dossier",
            "dossier_number",
            "رقم",
            "رقم_الملف",
            "رقم_الطالب",
        ],
        Field::Series => &["serie", "series", "section", "السلسلة", "الشعبة"],
        Field::Category => &["typec", "type", "category", "النوع"],
        Field::NameFr => &[
            "nom_fr",
            "nom",
            "name",
            "full_name",
            "student_name",
            "name_french",
            "nom_francais",
            "الاسم_فرنسية",
            "الاسم_بالفرنسية",
        ],
        Field::NameAr => &[
            "nom_ar",
            "name_arabic",
            "nom_arabe",
            "الاسم",
            "اسم_الطالب",
            "الاسم_عربية",
            "الاسم_بالعربية",
        ],
        Field::BirthDate => &[
            "datn",
            "date_naiss",
            "date_naissance",
            "birth_date",
            "date_of_birth",
            "dob",
            "تاريخ_الميلاد",
            "تاريخ_الولادة",
        ],
        Field::BirthplaceFr => &[
            "lieun_fr",
            "lieu_naiss",
            "lieu_nais",
            "lieu_naissance_fr",
            "birth_place",
            "place_of_birth",
            "birthplace_french",
            "مكان_الميلاد_فرنسية",
        ],
        Field::BirthplaceAr => &[
            "lieun_ar",
            "lieu_naissance_ar",
            "birthplace_arabic",
            "مكان_الميلاد",
            "مكان_الولادة",
            "مكان_الميلاد_عربية",
        ],
        Field::Score => &[
            "moy_bac",
            "moyenne_bac",
            "bac_average",
            "moyenne",
            "moyenne_bepc",
            "average",
            "grade",
            "score",
            "note",
            "معدل_البكالوريا",
            "المعدل",
        ],
        Field::Decision => &[
            "decision",
            "resultat",
            "result",
            "status",
            "outcome",
            "القرار",
        ],
        Field::WilayaFr => &[
            "wilaya_fr",
            "wilaya",
            "province",
            "province_french",
            "state",
            "region",
            "الولاية_فرنسية",
        ],
        Field::WilayaAr => &["wilaya_ar", "province_arabic", "الولاية", "الولاية_عربية"],
        Field::ExamCenter => &[
            "centre_ex",
            "centre",
            "center",
            "exam_center",
            "centre_examen",
            "المركز",
            "مركز_الامتحان",
        ],
        Field::SchoolFr => &[
            "etablissement",
            "ecole",
            "school",
            "institution",
            "الموسسة",
        ],
        Field::SchoolAr => &[
            "etablissement_ar",
            "school_arabic",
            "institution_arabic",
            "المدرسة",
            "الموسسة_عربية",
        ],
    }
}
