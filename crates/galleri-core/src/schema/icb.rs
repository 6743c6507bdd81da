// Participating Integrated Care Boards
//
// Source layout: Id, IcbCode, Board

use super::{Field, RowShape, Schema};

pub static SCHEMA: Schema = Schema {
    name: "participating-icb",
    fields: &[
        Field::n("Id", 0),
        Field::s("IcbCode", 1),
        Field::s("Board", 2),
    ],
    constants: &[],
    shape: RowShape::AtLeastMapped,
    required: &[],
    key: "Id",
};
