//! Label encoders for the categorical fields.
//!
//! Each encoder is the vocabulary fixed at training time; the integer code of
//! a class is its position in that vocabulary.

use std::collections::HashMap;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::errors::{ArtifactError, EncodeError};
use crate::ml::read_artifact;
use crate::types::Category;

#[derive(Debug, Clone, Deserialize)]
struct EncoderArtifact {
    classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LabelEncoder {
    category: Category,
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl LabelEncoder {
    pub fn new(category: Category, classes: Vec<String>) -> Result<Self, EncodeError> {
        if classes.is_empty() {
            return Err(EncodeError::EmptyVocabulary(category.field()));
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if codes.insert(class.clone(), code as u32).is_some() {
                return Err(EncodeError::DuplicateClass {
                    field: category.field(),
                    value: class.clone(),
                });
            }
        }

        Ok(Self {
            category,
            classes,
            codes,
        })
    }

    pub fn load(category: Category, path: &Path) -> Result<Self, ArtifactError> {
        let artifact: EncoderArtifact = read_artifact(path)?;
        let encoder = Self::new(category, artifact.classes).map_err(|err| ArtifactError::Invalid {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        if !encoder.is_sorted() {
            warn!(
                "[MODEL] {} encoder classes are not sorted; codes follow file order",
                category
            );
        }

        Ok(encoder)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn default_class(&self) -> &str {
        &self.classes[0]
    }

    pub fn is_sorted(&self) -> bool {
        self.classes.windows(2).all(|pair| pair[0] <= pair[1])
    }

    pub fn transform(&self, value: &str) -> Result<u32, EncodeError> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: self.category.field(),
                value: value.to_string(),
            })
    }

    #[cfg(test)]
    pub fn inverse_transform(&self, code: u32) -> Result<&str, EncodeError> {
        self.classes
            .get(code as usize)
            .map(String::as_str)
            .ok_or(EncodeError::UnknownCode {
                field: self.category.field(),
                code,
            })
    }
}

/// One encoder per [`Category`], stored in [`Category::ALL`] order.
#[derive(Debug, Clone)]
pub struct EncoderSet {
    encoders: Vec<LabelEncoder>,
}

impl EncoderSet {
    pub fn new(mut encoders: Vec<LabelEncoder>) -> Result<Self, EncodeError> {
        encoders.sort_by_key(|encoder| encoder.category());
        encoders.dedup_by_key(|encoder| encoder.category());

        for (position, category) in Category::ALL.iter().enumerate() {
            match encoders.get(position) {
                Some(encoder) if encoder.category() == *category => {}
                _ => return Err(EncodeError::MissingEncoder(category.field())),
            }
        }

        Ok(Self { encoders })
    }

    /// Loads `label_encoder_<Field>.json` for every categorical field.
    pub fn load_dir(dir: &Path) -> Result<Self, ArtifactError> {
        let mut encoders = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let path = dir.join(category.artifact_file_name());
            encoders.push(LabelEncoder::load(category, &path)?);
        }

        Self::new(encoders).map_err(|err| ArtifactError::Invalid {
            path: dir.to_path_buf(),
            reason: err.to_string(),
        })
    }

    pub fn get(&self, category: Category) -> &LabelEncoder {
        &self.encoders[category as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelEncoder> {
        self.encoders.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::testing::{fixture_dir, fixture_encoders};
    use crate::types::Field;

    fn travel() -> LabelEncoder {
        LabelEncoder::new(
            Category::BusinessTravel,
            vec![
                "Non-Travel".to_string(),
                "Travel_Frequently".to_string(),
                "Travel_Rarely".to_string(),
            ],
        )
        .expect("valid vocabulary")
    }

    #[test]
    fn codes_follow_vocabulary_position() {
        let encoder = travel();
        assert_eq!(encoder.transform("Non-Travel"), Ok(0));
        assert_eq!(encoder.transform("Travel_Frequently"), Ok(1));
        assert_eq!(encoder.transform("Travel_Rarely"), Ok(2));
    }

    #[test]
    fn encoding_is_deterministic_and_invertible_for_every_class() {
        let encoders = fixture_encoders();
        for encoder in encoders.iter() {
            for class in encoder.classes() {
                let first = encoder.transform(class).expect("known class");
                let second = encoder.transform(class).expect("known class");
                assert_eq!(first, second);
                assert_eq!(encoder.inverse_transform(first), Ok(class.as_str()));
            }
        }
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = travel().transform("Travel_Always").unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownCategory {
                field: Field::BusinessTravel,
                value: "Travel_Always".to_string(),
            }
        );
        assert_eq!(err.to_string(), "unknown BusinessTravel value `Travel_Always`");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(travel().transform("non-travel").is_err());
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            travel().inverse_transform(3),
            Err(EncodeError::UnknownCode {
                field: Field::BusinessTravel,
                code: 3,
            })
        );
    }

    #[test]
    fn empty_or_duplicated_vocabularies_are_invalid() {
        assert_eq!(
            LabelEncoder::new(Category::Gender, Vec::new()).unwrap_err(),
            EncodeError::EmptyVocabulary(Field::Gender)
        );
        let err = LabelEncoder::new(
            Category::Gender,
            vec!["Female".to_string(), "Male".to_string(), "Female".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, EncodeError::DuplicateClass { .. }));
    }

    #[test]
    fn set_requires_every_category() {
        let err = EncoderSet::new(vec![travel()]).unwrap_err();
        assert_eq!(err, EncodeError::MissingEncoder(Field::Department));
    }

    #[test]
    fn set_indexes_by_category() {
        let encoders = fixture_encoders();
        for category in Category::ALL {
            assert_eq!(encoders.get(category).category(), category);
        }
        assert_eq!(encoders.get(Category::OverTime).classes(), ["No", "Yes"]);
        assert_eq!(encoders.get(Category::JobRole).classes().len(), 9);
    }

    #[test]
    fn missing_artifact_names_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = EncoderSet::load_dir(dir.path()).unwrap_err();
        match err {
            ArtifactError::Missing(path) => {
                assert!(path.ends_with("label_encoder_BusinessTravel.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn corrupt_artifact_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        for category in Category::ALL {
            let source = fixture_dir().join(category.artifact_file_name());
            fs::copy(source, dir.path().join(category.artifact_file_name())).expect("copy fixture");
        }
        fs::write(dir.path().join("label_encoder_Gender.json"), b"{\"classes\": [").expect("write");

        let err = EncoderSet::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }), "{err}");
    }

    #[test]
    fn directory_in_place_of_artifact_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("label_encoder_Gender.json");
        fs::create_dir(&path).expect("mkdir");
        let err = LabelEncoder::load(Category::Gender, &path).unwrap_err();
        assert!(matches!(err, ArtifactError::NotAFile(_)));
    }

    #[test]
    fn empty_vocabulary_file_is_invalid() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("label_encoder_Gender.json");
        fs::write(&path, br#"{"classes": []}"#).expect("write");
        let err = LabelEncoder::load(Category::Gender, &path).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
    }
}
