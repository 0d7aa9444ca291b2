//! The hero record and its create/update payloads.
//!
//! The attribute list is declared once in `hero_attributes!`. The struct,
//! the emptiness check and the partial-update merge are
//! generated from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::HeroId;

macro_rules! hero_attributes {
    ($( $(#[$meta:meta])* $field:ident: $ty:ty ),* $(,)?) => {
        /// Every non-identifier attribute of a hero.
        ///
        /// All fields are nullable at the data layer. In a [`HeroPatch`] a
        /// `None` means "leave unchanged".
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct HeroAttributes {
            $(
                $(#[$meta])*
                #[serde(default)]
                pub $field: Option<$ty>,
            )*
        }

        impl HeroAttributes {
            /// Returns `true` if no attribute carries a value.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }

            /// Overwrite every attribute that `patch` supplies and return the
            /// names of the attributes that were written.
            fn merge(&mut self, patch: HeroAttributes) -> Vec<&'static str> {
                let mut updated = Vec::new();
                $(
                    if let Some(value) = patch.$field {
                        self.$field = Some(value);
                        updated.push(stringify!($field));
                    }
                )*
                updated
            }
        }
    };
}

hero_attributes! {
    /// Display name, e.g. `"Perseus"`.
    name: String,
    /// Short role or title, e.g. `"Demigod"`.
    role: String,
    description: String,
    /// URL of a portrait image.
    image_url: String,
    /// Historical or mythological era; used as an exact-match filter key.
    era: String,
    tags: Vec<String>,
    birth_date: NaiveDate,
    death_date: NaiveDate,
    achievements: Vec<String>,
    biography: String,
}

impl HeroAttributes {
    fn check_text(&self, required: bool) -> Result<(), CoreError> {
        for (field, value) in [("name", &self.name), ("role", &self.role)] {
            match value {
                None if required => return Err(CoreError::MissingField { field }),
                Some(text) if text.trim().is_empty() => {
                    return Err(CoreError::BlankField { field })
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn check_dates(&self) -> Result<(), CoreError> {
        if let (Some(birth), Some(death)) = (self.birth_date, self.death_date) {
            if death < birth {
                return Err(CoreError::DateOrder { birth, death });
            }
        }
        Ok(())
    }
}

/// A stored hero: the store-assigned identifier plus its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    #[serde(flatten)]
    pub attributes: HeroAttributes,
}

impl Hero {
    /// Materialise a freshly inserted hero.
    #[must_use]
    pub fn from_new(id: HeroId, hero: NewHero) -> Self {
        Self { id, attributes: hero.attributes }
    }
}

/// Payload of a create request. Carries no identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewHero {
    pub attributes: HeroAttributes,
}

impl NewHero {
    #[must_use]
    pub fn new(attributes: HeroAttributes) -> Self {
        Self { attributes }
    }

    /// Check the create payload.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingField`] if `name` or `role` is absent,
    /// [`CoreError::BlankField`] if either is blank, and
    /// [`CoreError::DateOrder`] if `death_date` precedes `birth_date`.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.attributes.check_text(true)?;
        self.attributes.check_dates()
    }
}

/// Payload of an update request. Absent (or `null`) fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroPatch {
    pub attributes: HeroAttributes,
}

impl HeroPatch {
    #[must_use]
    pub fn new(attributes: HeroAttributes) -> Self {
        Self { attributes }
    }

    /// Returns `true` if the patch supplies no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Check the supplied fields.
    ///
    /// # Errors
    /// Returns [`CoreError::BlankField`] if a supplied `name` or `role` is
    /// blank, and [`CoreError::DateOrder`] if both dates are supplied out of
    /// order.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.attributes.check_text(false)?;
        self.attributes.check_dates()
    }

    /// Write every supplied field into `hero` and return the written field
    /// names. The identifier is never touched.
    pub fn apply_to(self, hero: &mut Hero) -> Vec<&'static str> {
        hero.attributes.merge(self.attributes)
    }
}
