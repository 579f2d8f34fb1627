use serde::{Deserialize, Serialize};

/// A persisted student record.
///
/// The `id` is assigned by the storage backend on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// The writable fields of a student, as accepted by create and update.
///
/// Values of this type are normally produced by
/// [`StudentValidator::validate`](super::StudentValidator::validate), so they
/// already satisfy the field rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl NewStudent {
    /// Creates a new student payload.
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Attaches a storage-assigned id, producing a full record.
    pub fn with_id(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_serializes_all_fields() {
        let student = NewStudent::new("Ana", "ana@x.com", 21).with_id(1);

        let json = serde_json::to_value(&student).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Ana", "email": "ana@x.com", "age": 21})
        );
    }
}
