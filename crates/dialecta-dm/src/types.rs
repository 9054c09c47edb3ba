//! Column type inference for DM.

use dialecta_core::common::with_additional_type;
use dialecta_core::{CommonDialect, DialectError, FieldDescriptor, FieldKind, Result};

/// Largest size stored in `varchar`/`varbinary`; bigger or unsized fields
/// use the long types.
const MAX_VAR_SIZE: i64 = 65532;

/// Picks the DM column type for a field.
///
/// DM allows one auto increment column per table and it must be a key
/// column, so `AUTO_INCREMENT` is dropped from fields that are neither the
/// primary key nor indexed.
pub fn data_type_of(
    common: &CommonDialect,
    field: &mut FieldDescriptor,
    dialect_name: &str,
) -> Result<String> {
    let parsed = common.parse_field_struct(field);

    if field.tag_settings.contains("AUTO_INCREMENT")
        && !field.tag_settings.contains("INDEX")
        && !field.is_primary_key
    {
        field.tag_settings.remove("AUTO_INCREMENT");
    }

    let size = parsed.size;
    let mut sql_type = parsed.sql_type.clone();
    if sql_type.is_empty() {
        sql_type = match &parsed.kind {
            FieldKind::Bool => "bit".to_string(),
            FieldKind::Int8 => integer(common, field, "tinyint"),
            FieldKind::Int | FieldKind::Int16 | FieldKind::Int32 => integer(common, field, "int"),
            FieldKind::Uint8 => integer(common, field, "tinyint unsigned"),
            FieldKind::Uint | FieldKind::Uint16 | FieldKind::Uint32 | FieldKind::Uintptr => {
                integer(common, field, "int unsigned")
            }
            FieldKind::Int64 => integer(common, field, "bigint"),
            FieldKind::Uint64 => integer(common, field, "bigint unsigned"),
            FieldKind::Float32 | FieldKind::Float64 => "double".to_string(),
            FieldKind::String if size > 0 && size < MAX_VAR_SIZE => format!("varchar({size})"),
            FieldKind::String => "longtext".to_string(),
            FieldKind::Time => datetime(field),
            kind if kind.is_bytes() && size > 0 && size < MAX_VAR_SIZE => {
                format!("varbinary({size})")
            }
            kind if kind.is_bytes() => "longblob".to_string(),
            _ => String::new(),
        };
    }

    if sql_type.is_empty() {
        return Err(DialectError::InvalidSqlType {
            field: field.name.clone(),
            kind: parsed.kind.name(),
            dialect: dialect_name.to_string(),
        });
    }

    Ok(with_additional_type(sql_type, &parsed.additional_type))
}

/// Integer type, marked `AUTO_INCREMENT` (on the field too) when eligible.
fn integer(common: &CommonDialect, field: &mut FieldDescriptor, base: &str) -> String {
    if common.field_can_auto_increment(field) {
        field.tag_settings.set("AUTO_INCREMENT", "AUTO_INCREMENT");
        format!("{base} AUTO_INCREMENT")
    } else {
        base.to_string()
    }
}

fn datetime(field: &FieldDescriptor) -> String {
    let precision = field
        .tag_settings
        .get("PRECISION")
        .map(|p| format!("({p})"))
        .unwrap_or_default();

    if field.tag_settings.contains("NOT NULL") || field.is_primary_key {
        format!("DATETIME{precision}")
    } else {
        format!("DATETIME{precision} NULL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn type_of(field: &mut FieldDescriptor) -> String {
        data_type_of(&CommonDialect::new(), field, "dmsql").unwrap()
    }

    #[test]
    fn test_scalar_types() {
        assert_eq!(type_of(&mut FieldDescriptor::of::<bool>("Active")), "bit");
        assert_eq!(type_of(&mut FieldDescriptor::of::<i8>("Level")), "tinyint");
        assert_eq!(type_of(&mut FieldDescriptor::of::<i16>("Rank")), "int");
        assert_eq!(type_of(&mut FieldDescriptor::of::<i32>("Age")), "int");
        assert_eq!(type_of(&mut FieldDescriptor::of::<isize>("Offset")), "int");
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<u8>("Flags")),
            "tinyint unsigned"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<u32>("Hits")),
            "int unsigned"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::new("Addr", FieldKind::Uintptr)),
            "int unsigned"
        );
        assert_eq!(type_of(&mut FieldDescriptor::of::<i64>("Total")), "bigint");
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<u64>("Serial")),
            "bigint unsigned"
        );
        assert_eq!(type_of(&mut FieldDescriptor::of::<f32>("Ratio")), "double");
        assert_eq!(type_of(&mut FieldDescriptor::of::<f64>("Price")), "double");
    }

    #[test]
    fn test_auto_increment_variants_set_tag() {
        let cases: Vec<(FieldDescriptor, &str)> = vec![
            (FieldDescriptor::of::<i8>("ID"), "tinyint AUTO_INCREMENT"),
            (FieldDescriptor::of::<i32>("ID"), "int AUTO_INCREMENT"),
            (FieldDescriptor::of::<u8>("ID"), "tinyint unsigned AUTO_INCREMENT"),
            (FieldDescriptor::of::<u16>("ID"), "int unsigned AUTO_INCREMENT"),
            (FieldDescriptor::of::<i64>("ID"), "bigint AUTO_INCREMENT"),
            (FieldDescriptor::of::<u64>("ID"), "bigint unsigned AUTO_INCREMENT"),
        ];
        for (field, expected) in cases {
            let mut field = field.primary_key();
            assert_eq!(type_of(&mut field), expected);
            assert_eq!(
                field.tag_settings.get("AUTO_INCREMENT"),
                Some("AUTO_INCREMENT")
            );
        }
    }

    #[test]
    fn test_auto_increment_stripped_without_key() {
        let mut field = FieldDescriptor::of::<i64>("Seq").tags("auto_increment");
        assert_eq!(type_of(&mut field), "bigint");
        assert!(!field.tag_settings.contains("AUTO_INCREMENT"));
    }

    #[test]
    fn test_auto_increment_kept_on_index() {
        let mut field = FieldDescriptor::of::<i64>("Seq").tags("auto_increment;index");
        assert_eq!(type_of(&mut field), "bigint AUTO_INCREMENT");
        assert!(field.tag_settings.contains("AUTO_INCREMENT"));
    }

    #[test]
    fn test_auto_increment_disabled_on_primary_key() {
        let mut field = FieldDescriptor::of::<i64>("ID")
            .primary_key()
            .tags("auto_increment:false");
        assert_eq!(type_of(&mut field), "bigint");
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<String>("Name").tags("size:100")),
            "varchar(100)"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<String>("Name")),
            "varchar(255)"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<String>("Body").tags("size:0")),
            "longtext"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<String>("Body").tags("size:65532")),
            "longtext"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<String>("Body").tags("size:65531")),
            "varchar(65531)"
        );
    }

    #[test]
    fn test_bytes() {
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<Vec<u8>>("Hash").tags("size:32")),
            "varbinary(32)"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<[u8; 16]>("Uuid").tags("size:-1")),
            "longblob"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<Vec<u8>>("Blob").tags("size:70000")),
            "longblob"
        );
    }

    #[test]
    fn test_datetime() {
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<DateTime<Utc>>("CreatedAt")),
            "DATETIME NULL"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<DateTime<Utc>>("CreatedAt").tags("precision:6")),
            "DATETIME(6) NULL"
        );
        assert_eq!(
            type_of(
                &mut FieldDescriptor::of::<DateTime<Utc>>("CreatedAt").tags("precision:3;not null")
            ),
            "DATETIME(3) NOT NULL"
        );
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<DateTime<Utc>>("At").primary_key()),
            "DATETIME"
        );
    }

    #[test]
    fn test_additional_type_appended() {
        assert_eq!(
            type_of(&mut FieldDescriptor::of::<i32>("Age").tags("not null;default:0")),
            "int NOT NULL DEFAULT 0"
        );
    }

    #[test]
    fn test_explicit_type_wins() {
        let mut field = FieldDescriptor::of::<String>("Doc").tags("type:clob");
        assert_eq!(type_of(&mut field), "clob");

        let mut field = FieldDescriptor::new("Meta", FieldKind::Struct("Meta".to_string()))
            .tags("type:text");
        assert_eq!(type_of(&mut field), "text");
    }

    #[test]
    fn test_scanner_uses_inner_kind() {
        let mut field = FieldDescriptor::new(
            "Score",
            FieldKind::Scanner(Box::new(FieldKind::Float64)),
        );
        assert_eq!(type_of(&mut field), "double");
    }

    #[test]
    fn test_unknown_kind_fails() {
        let mut field = FieldDescriptor::new("Meta", FieldKind::Struct("Meta".to_string()));
        let err = data_type_of(&CommonDialect::new(), &mut field, "dmsql").unwrap_err();
        assert_eq!(err.to_string(), "invalid sql type Meta in field Meta for dmsql");
    }
}
