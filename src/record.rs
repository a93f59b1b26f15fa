//! Canonical record model.
//!
//! Every uploaded sheet, whatever its column spellings, is normalized into
//! [`StudentRecord`]: a fixed schema with all fields present and defaulted.
//! The schema mirrors a baccalaureate results sheet with bilingual
//! (Arabic/French) name, birthplace, wilaya and school columns.

use serde::{Deserialize, Serialize};

/// The unique numeric key of a record (dossier/file number).
pub type Dossier = u64;

/// Language variant of a name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ar,
    Fr,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Ar, Lang::Fr];
}

/// How a canonical field's raw cell value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unique numeric key: digits kept, anything else stripped, invalid -> 0.
    Key,
    /// Decimal score: comma/Arabic-comma decimal separators accepted.
    Decimal,
    /// Free text: trimmed and length-capped.
    Text,
}

/// Canonical field identifiers, one per column of the fixed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Dossier,
    Series,
    Category,
    NameFr,
    NameAr,
    BirthDate,
    BirthplaceFr,
    BirthplaceAr,
    Score,
    Decision,
    WilayaFr,
    WilayaAr,
    ExamCenter,
    SchoolFr,
    SchoolAr,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Dossier,
        Field::Series,
        Field::Category,
        Field::NameFr,
        Field::NameAr,
        Field::BirthDate,
        Field::BirthplaceFr,
        Field::BirthplaceAr,
        Field::Score,
        Field::Decision,
        Field::WilayaFr,
        Field::WilayaAr,
        Field::ExamCenter,
        Field::SchoolFr,
        Field::SchoolAr,
    ];

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Dossier => FieldKind::Key,
            Field::Score => FieldKind::Decimal,
            _ => FieldKind::Text,
        }
    }

    /// Canonical name used in mapping reports and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Dossier => "dossier",
            Field::Series => "series",
            Field::Category => "category",
            Field::NameFr => "name_fr",
            Field::NameAr => "name_ar",
            Field::BirthDate => "birth_date",
            Field::BirthplaceFr => "birthplace_fr",
            Field::BirthplaceAr => "birthplace_ar",
            Field::Score => "score",
            Field::Decision => "decision",
            Field::WilayaFr => "wilaya_fr",
            Field::WilayaAr => "wilaya_ar",
            Field::ExamCenter => "exam_center",
            Field::SchoolFr => "school_fr",
            Field::SchoolAr => "school_ar",
        }
    }
}

/// A normalized result entry. All fields are always present; unmapped or
/// unparsable cells land as `0` / `0.0` / empty string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentRecord {
    pub dossier: Dossier,
    pub series: String,
    pub category: String,
    pub name_fr: String,
    pub name_ar: String,
    pub birth_date: String,
    pub birthplace_fr: String,
    pub birthplace_ar: String,
    pub score: f64,
    pub decision: String,
    pub wilaya_fr: String,
    pub wilaya_ar: String,
    pub exam_center: String,
    pub school_fr: String,
    pub school_ar: String,
}

impl StudentRecord {
    pub fn name(&self, lang: Lang) -> &str {
        match lang {
            Lang::Ar => &self.name_ar,
            Lang::Fr => &self.name_fr,
        }
    }

    /// Preferred name for ranking and rendering: Arabic when present,
    /// French otherwise.
    pub fn display_name(&self) -> &str {
        if !self.name_ar.is_empty() {
            &self.name_ar
        } else {
            &self.name_fr
        }
    }

    /// A record enters the index only with a non-zero key and at least one
    /// non-empty name variant. Rows failing this are dropped silently.
    pub fn is_indexable(&self) -> bool {
        self.dossier != 0
            && (!self.name_fr.trim().is_empty() || !self.name_ar.trim().is_empty())
    }

    /// Mutable access to a text field slot; `None` for the key and score
    /// fields, which have their own coercion paths.
    pub(crate) fn text_field_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Series => Some(&mut self.series),
            Field::Category => Some(&mut self.category),
            Field::NameFr => Some(&mut self.name_fr),
            Field::NameAr => Some(&mut self.name_ar),
            Field::BirthDate => Some(&mut self.birth_date),
            Field::BirthplaceFr => Some(&mut self.birthplace_fr),
            Field::BirthplaceAr => Some(&mut self.birthplace_ar),
            Field::Decision => Some(&mut self.decision),
            Field::WilayaFr => Some(&mut self.wilaya_fr),
            Field::WilayaAr => Some(&mut self.wilaya_ar),
            Field::ExamCenter => Some(&mut self.exam_center),
            Field::SchoolFr => Some(&mut self.school_fr),
            Field::SchoolAr => Some(&mut self.school_ar),
            Field::Dossier | Field::Score => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_arabic() {
        let record = StudentRecord {
            dossier: 1,
            name_fr: "Sara Ali".to_string(),
            name_ar: "سارة علي".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_name(), "سارة علي");
    }

    #[test]
    fn test_display_name_falls_back_to_french() {
        let record = StudentRecord {
            dossier: 1,
            name_fr: "Sara Ali".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_name(), "Sara Ali");
    }

    #[test]
    fn test_indexable_requires_key_and_name() {
        let mut record = StudentRecord {
            dossier: 7,
            name_fr: "Amine Ben".to_string(),
            ..Default::default()
        };
        assert!(record.is_indexable());

        record.dossier = 0;
        assert!(!record.is_indexable(), "zero key must not be indexable");

        record.dossier = 7;
        record.name_fr.clear();
        assert!(!record.is_indexable(), "record without any name must not be indexable");

        record.name_ar = "أمين".to_string();
        assert!(record.is_indexable(), "an Arabic-only name is enough");
    }

    #[test]
    fn test_whitespace_name_is_not_a_name() {
        let record = StudentRecord {
            dossier: 7,
            name_fr: "   ".to_string(),
            ..Default::default()
        };
        assert!(!record.is_indexable());
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(Field::Dossier.kind(), FieldKind::Key);
        assert_eq!(Field::Score.kind(), FieldKind::Decimal);
        for field in Field::ALL {
            if field != Field::Dossier && field != Field::Score {
                assert_eq!(field.kind(), FieldKind::Text, "{} should be text", field.name());
            }
        }
    }

    #[test]
    fn test_every_text_field_has_a_slot() {
        let mut record = StudentRecord::default();
        for field in Field::ALL {
            let slot = record.text_field_mut(field);
            match field.kind() {
                FieldKind::Text => assert!(slot.is_some(), "{} missing a text slot", field.name()),
                _ => assert!(slot.is_none()),
            }
        }
    }
}
