//! Dog field schema and request-body validation -- pure logic, no database access.
//!
//! Create and update bodies go through the same routine, [`validate`]; the
//! [`ValidationMode`] decides whether required fields must be present.

use serde_json::{Map, Value};

/// Whether a body describes a new dog or a partial change to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every required field must be present.
    Create,
    /// Any subset of fields may be present.
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Number,
    String,
}

/// The fixed set of keys a client may send for a dog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogField {
    Age,
    Name,
    Description,
    Breed,
}

impl DogField {
    /// All client-writable fields, in the order their checks run.
    pub const ALL: [DogField; 4] = [
        DogField::Age,
        DogField::Name,
        DogField::Description,
        DogField::Breed,
    ];

    /// JSON key for this field.
    pub fn key(self) -> &'static str {
        match self {
            DogField::Age => "age",
            DogField::Name => "name",
            DogField::Description => "description",
            DogField::Breed => "breed",
        }
    }

    /// Look up a field by its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Whether a create body must carry this field.
    pub fn required_on_create(self) -> bool {
        !matches!(self, DogField::Breed)
    }

    fn nullable(self) -> bool {
        matches!(self, DogField::Breed)
    }

    fn kind(self) -> FieldKind {
        match self {
            DogField::Age => FieldKind::Number,
            DogField::Name | DogField::Description | DogField::Breed => FieldKind::String,
        }
    }

    fn type_error(self) -> String {
        let expected = match self.kind() {
            FieldKind::Number => "a number",
            FieldKind::String => "a string",
        };
        format!("{} should be {expected}", self.key())
    }
}

/// A validated create body.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub age: f64,
    pub description: String,
    pub breed: Option<String>,
}

/// A validated update body. `None` leaves the stored value untouched.
///
/// `breed` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DogPatch {
    pub name: Option<String>,
    pub age: Option<f64>,
    pub description: Option<String>,
    pub breed: Option<Option<String>>,
}

impl DogPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.description.is_none() && self.breed.is_none()
    }

    fn is_set(&self, field: DogField) -> bool {
        match field {
            DogField::Age => self.age.is_some(),
            DogField::Name => self.name.is_some(),
            DogField::Description => self.description.is_some(),
            DogField::Breed => self.breed.is_some(),
        }
    }

    fn apply(&mut self, field: DogField, value: FieldValue) {
        match (field, value) {
            (DogField::Age, FieldValue::Number(n)) => self.age = Some(n),
            (DogField::Name, FieldValue::String(s)) => self.name = Some(s),
            (DogField::Description, FieldValue::String(s)) => self.description = Some(s),
            (DogField::Breed, FieldValue::String(s)) => self.breed = Some(Some(s)),
            (DogField::Breed, FieldValue::Null) => self.breed = Some(None),
            _ => {}
        }
    }
}

impl TryFrom<DogPatch> for NewDog {
    type Error = Vec<String>;

    fn try_from(patch: DogPatch) -> Result<Self, Self::Error> {
        let missing: Vec<String> = DogField::ALL
            .into_iter()
            .filter(|field| field.required_on_create() && !patch.is_set(*field))
            .map(DogField::type_error)
            .collect();

        match patch {
            DogPatch {
                name: Some(name),
                age: Some(age),
                description: Some(description),
                breed,
            } => Ok(NewDog {
                name,
                age,
                description,
                breed: breed.flatten(),
            }),
            _ => Err(missing),
        }
    }
}

enum FieldValue {
    Number(f64),
    String(String),
    Null,
}

/// Check a raw JSON body against the dog schema.
///
/// Checks run in a fixed order (`age`, `name`, `description`, `breed`), then
/// every key outside the allowed set is reported in input order. All checks
/// run, so one call surfaces every problem with the body.
pub fn validate(body: &Map<String, Value>, mode: ValidationMode) -> Result<DogPatch, Vec<String>> {
    let mut errors = Vec::new();
    let mut patch = DogPatch::default();

    for field in DogField::ALL {
        match check_field(field, body.get(field.key()), mode) {
            Ok(Some(value)) => patch.apply(field, value),
            Ok(None) => {}
            Err(message) => errors.push(message),
        }
    }

    errors.extend(
        body.keys()
            .filter(|key| DogField::from_key(key).is_none())
            .map(|key| format!("'{key}' is not a valid key")),
    );

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Validate a create body into a [`NewDog`].
pub fn validate_new_dog(body: &Map<String, Value>) -> Result<NewDog, Vec<String>> {
    validate(body, ValidationMode::Create).and_then(NewDog::try_from)
}

/// Validate an update body into a [`DogPatch`].
pub fn validate_dog_patch(body: &Map<String, Value>) -> Result<DogPatch, Vec<String>> {
    validate(body, ValidationMode::Update)
}

fn check_field(
    field: DogField,
    value: Option<&Value>,
    mode: ValidationMode,
) -> Result<Option<FieldValue>, String> {
    let value = match value {
        None if mode == ValidationMode::Create && field.required_on_create() => {
            return Err(field.type_error());
        }
        None => return Ok(None),
        Some(Value::Null) if field.nullable() => return Ok(Some(FieldValue::Null)),
        Some(v) => v,
    };

    let parsed = match field.kind() {
        FieldKind::Number => value.as_f64().map(FieldValue::Number),
        FieldKind::String => value.as_str().map(|s| FieldValue::String(s.to_owned())),
    };

    parsed.map(Some).ok_or_else(|| field.type_error())
}
