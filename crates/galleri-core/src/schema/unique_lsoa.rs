// One representative row per LSOA_2011 code

use super::{Field, RowShape, Schema};

pub static SCHEMA: Schema = Schema {
    name: "unique-lsoa",
    fields: &[
        Field::s("LOCAL_AUT_ORG", 0),
        Field::s("NHS_ENG_REGION", 1),
        Field::s("SUB_ICB", 2),
        Field::s("CANCER_REGISTRY", 3),
        Field::s("LSOA_2011", 4),
        Field::s("MSOA_2011", 5),
        Field::s("CANCER_ALLIANCE", 6),
        Field::s("ICB", 7),
        Field::s("OA_2021", 8),
        Field::s("LSOA_2021", 9),
        Field::s("MSOA_2021", 10),
        Field::n("IMD_RANK", 11),
        Field::n("IMD_DECILE", 12),
        Field::s("LSOA_NAME", 13),
        Field::s("AVG_EASTING", 14),
        Field::s("AVG_NORTHING", 15),
        Field::s("MODERATOR", 16),
    ],
    constants: &[],
    shape: RowShape::AtLeastMapped,
    required: &[],
    key: "LSOA_2011",
};
