// Postcode-level LSOA lookup
//
// Note: ICB is read from column 14, after the 2021 census codes. The subset
// extract header lists ICB before OA_2021; the mapping below is the one the
// loaded tables were built with.

use super::{Field, RowShape, Schema};

pub static SCHEMA: Schema = Schema {
    name: "lsoa",
    fields: &[
        Field::s("POSTCODE", 0),
        Field::s("POSTCODE_2", 1),
        Field::s("LOCAL_AUT_ORG", 2),
        Field::s("NHS_ENG_REGION", 3),
        Field::s("SUB_ICB", 4),
        Field::s("CANCER_REGISTRY", 5),
        Field::s("EASTING_1M", 6),
        Field::s("NORTHING_1M", 7),
        Field::s("LSOA_2011", 8),
        Field::s("MSOA_2011", 9),
        Field::s("CANCER_ALLIANCE", 10),
        Field::s("OA_2021", 11),
        Field::s("LSOA_2021", 12),
        Field::s("MSOA_2021", 13),
        Field::s("ICB", 14),
        Field::n("IMD_RANK", 15),
        Field::n("IMD_DECILE", 16),
    ],
    constants: &[],
    shape: RowShape::AtLeastMapped,
    required: &[],
    key: "POSTCODE",
};
