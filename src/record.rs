//! Record types the binder can populate.
//!
//! A [`Record`] exposes its fields as [`FieldDescriptor`]s with dynamic get/set
//! access. Most types get the implementation from [`mapped_record!`]; hand
//! written implementations only need the four accessors plus at least one of
//! the construction strategies.

use std::any::type_name;

use log::trace;

use crate::{data::Value, error::BindError, field::FieldDescriptor};

pub trait Record: Sized {
    /// Fields in declaration order. The slice is computed once per type.
    fn descriptors() -> &'static [FieldDescriptor];

    /// Current value of `field`; `None` when the field is null or undeclared.
    fn get(&self, field: &str) -> Option<Value>;

    fn set(&mut self, field: &str, value: Option<Value>) -> Result<(), BindError>;

    /// Ordinary construction, e.g. through `Default`.
    fn construct() -> Option<Self> {
        None
    }

    /// Field-wise zero values, bypassing any constructor logic.
    fn zeroed() -> Option<Self> {
        None
    }
}

/// Produces a default instance of `R`, preferring [`Record::construct`] over
/// [`Record::zeroed`].
pub fn new_instance<R: Record>() -> Result<R, BindError> {
    if let Some(instance) = R::construct() {
        return Ok(instance);
    }
    if let Some(instance) = R::zeroed() {
        trace!("Zero-initialized {} without a constructor", type_name::<R>());
        return Ok(instance);
    }
    Err(BindError::Construction {
        type_name: type_name::<R>(),
    })
}

/// Builds a fresh instance whose declared fields are copied from `template`.
pub fn clone_template<R: Record>(template: &R) -> Result<R, BindError> {
    let mut cloned = new_instance::<R>()?;
    for descriptor in R::descriptors() {
        cloned.set(descriptor.name, template.get(descriptor.name))?;
    }
    Ok(cloned)
}

/// Replaces every null string field with an empty string. Non-null strings and
/// other field types are left alone.
pub fn normalize_null_strings<R: Record>(instance: &mut R) -> Result<(), BindError> {
    for descriptor in R::descriptors().iter().filter(|d| d.is_string()) {
        if instance.get(descriptor.name).is_none() {
            instance.set(descriptor.name, Some(Value::String(String::new())))?;
        }
    }
    Ok(())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $column:literal) => {
        $column
    };
}

/// Declares a struct and implements [`Record`](crate::record::Record) for it.
///
/// Each field may name the source column it binds from; otherwise the Rust
/// identifier is used. Column matching against the source is case-insensitive.
///
/// New instances are zero-initialized field by field. Put `#[record(default)]`
/// first to build them through the type's `Default` impl instead; it must
/// precede any other attribute.
///
/// ```
/// rowbind::mapped_record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Customer {
///         pub customer_id: i32 => "CustomerId",
///         pub first_name: Option<String> => "FirstName",
///         pub zip: i32,
///     }
/// }
///
/// rowbind::mapped_record! {
///     #[record(default)]
///     pub struct Account {
///         pub id: i64 => "Id",
///         pub zip: i32 => "Zip",
///     }
/// }
///
/// impl Default for Account {
///     fn default() -> Self {
///         Account { id: 0, zip: -1 }
///     }
/// }
///
/// let account = rowbind::new_instance::<Account>().unwrap();
/// assert_eq!(account.zip, -1);
/// ```
#[macro_export]
macro_rules! mapped_record {
    (
        @define [$($construct:tt)*]
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $column:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::record::Record for $name {
            fn descriptors() -> &'static [$crate::field::FieldDescriptor] {
                const DESCRIPTORS: &[$crate::field::FieldDescriptor] = &[
                    $(
                        $crate::field::FieldDescriptor::of::<$ty>(
                            $crate::__record_field_name!($field $(, $column)?),
                        ),
                    )*
                ];
                DESCRIPTORS
            }

            fn get(&self, field: &str) -> ::core::option::Option<$crate::data::Value> {
                $(
                    if field == $crate::__record_field_name!($field $(, $column)?) {
                        return $crate::field::FieldValue::to_value(&self.$field);
                    }
                )*
                ::core::option::Option::None
            }

            fn set(
                &mut self,
                field: &str,
                value: ::core::option::Option<$crate::data::Value>,
            ) -> ::core::result::Result<(), $crate::error::BindError> {
                $(
                    if field == $crate::__record_field_name!($field $(, $column)?) {
                        self.$field = <$ty as $crate::field::FieldValue>::from_value(value)
                            .map_err(|source| $crate::error::BindError::conversion(field, source))?;
                        return ::core::result::Result::Ok(());
                    }
                )*
                ::core::result::Result::Err($crate::error::BindError::UnknownField {
                    field: field.to_string(),
                    type_name: ::core::any::type_name::<Self>(),
                })
            }

            $($construct)*

            fn zeroed() -> ::core::option::Option<Self> {
                ::core::option::Option::Some(Self {
                    $(
                        $field: <$ty as $crate::field::FieldValue>::zero(),
                    )*
                })
            }
        }
    };
    (#[record(default)] $($rest:tt)*) => {
        $crate::mapped_record! {
            @define [
                fn construct() -> ::core::option::Option<Self> {
                    ::core::option::Option::Some(<Self as ::core::default::Default>::default())
                }
            ]
            $($rest)*
        }
    };
    ($($rest:tt)*) => {
        $crate::mapped_record! { @define [] $($rest)* }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldType, FieldValue};

    mapped_record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Contact {
            id: i32 => "ContactId",
            name: Option<String>,
            nickname: String,
            score: Option<f64>,
        }
    }

    mapped_record! {
        #[record(default)]
        #[derive(Debug, Clone, PartialEq)]
        struct Account {
            id: i64 => "Id",
            zip: i32 => "Zip",
            owner: Option<String> => "Owner",
        }
    }

    impl Default for Account {
        fn default() -> Self {
            Self {
                id: 0,
                zip: -1,
                owner: Some("unassigned".to_string()),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        count: i64,
        label: Option<String>,
    }

    impl Default for Counter {
        fn default() -> Self {
            Self {
                count: 10,
                label: None,
            }
        }
    }

    impl Record for Counter {
        fn descriptors() -> &'static [FieldDescriptor] {
            const DESCRIPTORS: &[FieldDescriptor] = &[
                FieldDescriptor::of::<i64>("count"),
                FieldDescriptor::of::<Option<String>>("label"),
            ];
            DESCRIPTORS
        }

        fn get(&self, field: &str) -> Option<Value> {
            match field {
                "count" => self.count.to_value(),
                "label" => self.label.to_value(),
                _ => None,
            }
        }

        fn set(&mut self, field: &str, value: Option<Value>) -> Result<(), BindError> {
            match field {
                "count" => {
                    self.count =
                        i64::from_value(value).map_err(|e| BindError::conversion(field, e))?
                }
                "label" => {
                    self.label = Option::<String>::from_value(value)
                        .map_err(|e| BindError::conversion(field, e))?
                }
                _ => {
                    return Err(BindError::UnknownField {
                        field: field.to_string(),
                        type_name: type_name::<Self>(),
                    });
                }
            }
            Ok(())
        }

        fn construct() -> Option<Self> {
            Some(Self::default())
        }
    }

    struct Opaque;

    impl Record for Opaque {
        fn descriptors() -> &'static [FieldDescriptor] {
            &[]
        }

        fn get(&self, _field: &str) -> Option<Value> {
            None
        }

        fn set(&mut self, field: &str, _value: Option<Value>) -> Result<(), BindError> {
            Err(BindError::UnknownField {
                field: field.to_string(),
                type_name: type_name::<Self>(),
            })
        }
    }

    #[test]
    fn macro_derives_descriptors_with_column_names() {
        let descriptors = Contact::descriptors();
        assert_eq!(descriptors.len(), 4);
        assert_eq!(descriptors[0].name, "ContactId");
        assert_eq!(descriptors[1].name, "name");
        assert!(descriptors[1].optional);
        assert_eq!(descriptors[3].field_type, FieldType::F64);
    }

    #[test]
    fn new_instance_prefers_construct_over_zeroed() {
        let counter = new_instance::<Counter>().unwrap();
        assert_eq!(counter.count, 10);

        let contact = new_instance::<Contact>().unwrap();
        assert_eq!(contact.id, 0);
        assert_eq!(contact.name, None);
    }

    #[test]
    fn macro_default_marker_constructs_through_default() {
        let account = new_instance::<Account>().unwrap();
        assert_eq!(account, Account::default());
        assert_eq!(account.zip, -1);

        let zeroed = Account::zeroed().unwrap();
        assert_eq!(zeroed.zip, 0);
        assert_eq!(zeroed.owner, None);
    }

    #[test]
    fn new_instance_fails_without_any_strategy() {
        let err = new_instance::<Opaque>().err().expect("construction error");
        assert!(matches!(err, BindError::Construction { .. }));
    }

    #[test]
    fn clone_template_copies_every_field() {
        let template = Contact {
            id: 7,
            name: Some("Ann".to_string()),
            nickname: "A".to_string(),
            score: None,
        };
        let cloned = clone_template(&template).unwrap();
        assert_eq!(cloned, template);
    }

    #[test]
    fn normalize_only_touches_null_strings() {
        let mut contact = Contact {
            id: 1,
            name: None,
            nickname: "kept".to_string(),
            score: None,
        };
        normalize_null_strings(&mut contact).unwrap();
        assert_eq!(contact.name.as_deref(), Some(""));
        assert_eq!(contact.nickname, "kept");
        assert_eq!(contact.score, None);
    }

    #[test]
    fn set_rejects_undeclared_fields() {
        let mut contact = new_instance::<Contact>().unwrap();
        let err = contact
            .set("Unknown", Some(Value::Integer(1)))
            .unwrap_err();
        assert!(matches!(err, BindError::UnknownField { .. }));
    }
}
