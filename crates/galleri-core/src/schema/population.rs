// Synthetic participant population
//
// Two export widths are in circulation. The 27-column variant carries an
// extra column at position 2 that no table stores.

use super::{Constant, Field, RowShape, Schema, Width};

pub static SCHEMA: Schema = Schema {
    name: "population",
    fields: &[
        Field::s("PersonId", 0),
        Field::s("superseded_by_subject_id", 1),
        Field::s("primary_care_provider", 2),
        Field::s("name_prefix", 3),
        Field::s("first_given_name", 4),
        Field::s("other_given_names", 5),
        Field::s("family_name", 6),
        Field::s("date_of_birth", 7),
        Field::s("gender_code", 8),
        Field::s("address_line_1", 9),
        Field::s("address_line_2", 10),
        Field::s("address_line_3", 11),
        Field::s("address_line_4", 12),
        Field::s("address_line_5", 13),
        Field::s("postcode", 14),
        Field::s("removal_reason", 15),
        Field::s("removal_date", 16),
        Field::s("date_of_death", 17),
        Field::s("telephone_number_home", 18),
        Field::s("telephone_number_mobile", 19),
        Field::s("email_address_home", 20),
        Field::s("preferred_language", 21),
        Field::s("interpreter_required", 22),
        Field::s("sensitivity_indicator_flag", 23),
        Field::s("Invited", 24),
        Field::s("LsoaCode", 25),
    ],
    constants: &[Constant {
        attribute: "identified_to_be_invited",
        value: false,
    }],
    shape: RowShape::Widths(&[
        Width {
            columns: 26,
            ignored: &[],
        },
        Width {
            columns: 27,
            ignored: &[2],
        },
    ]),
    required: &["PersonId", "LsoaCode"],
    key: "PersonId",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SkipReason;
    use crate::AttributeValue;

    fn numbered_row(width: usize) -> Vec<String> {
        (1..=width).map(|n| n.to_string()).collect()
    }

    #[test]
    fn wide_row_drops_third_column() {
        let attributes = SCHEMA.apply(&numbered_row(27)).unwrap();
        assert_eq!(attributes.get("PersonId"), Some(&AttributeValue::string("1")));
        assert_eq!(
            attributes.get("superseded_by_subject_id"),
            Some(&AttributeValue::string("2"))
        );
        assert_eq!(
            attributes.get("primary_care_provider"),
            Some(&AttributeValue::string("4"))
        );
        assert_eq!(attributes.get("LsoaCode"), Some(&AttributeValue::string("27")));
    }

    #[test]
    fn other_widths_are_skipped() {
        for width in [25, 28] {
            assert_eq!(
                SCHEMA.apply(&numbered_row(width)).unwrap_err(),
                SkipReason::UnexpectedWidth {
                    found: width,
                    expected: vec![26, 27],
                }
            );
        }
    }

    #[test]
    fn empty_lsoa_code_is_skipped() {
        let mut row = numbered_row(26);
        row[25].clear();
        assert_eq!(
            SCHEMA.apply(&row).unwrap_err(),
            SkipReason::MissingValue {
                attribute: "LsoaCode"
            }
        );
    }

    #[test]
    fn constant_flag_is_appended_last() {
        let attributes = SCHEMA.apply(&numbered_row(26)).unwrap();
        let (name, value) = attributes.iter().last().unwrap();
        assert_eq!(name, "identified_to_be_invited");
        assert_eq!(value, &AttributeValue::Bool(false));
    }
}
