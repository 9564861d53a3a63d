//! Human-readable names of the Modbus function codes exercised by the
//! benchmark applications.

use crate::data::FUNCTION_ALL;

pub static FUNCTION_LABELS: &[(&str, &str)] = &[
    ("MODBUS_FC_READ_SINGLE_COIL", "read single coil"),
    ("MODBUS_FC_READ_MULTIPLE_COILS", "read multiple coils"),
    ("MODBUS_FC_WRITE_SINGLE_COIL", "write single coil"),
    ("MODBUS_FC_WRITE_MULTIPLE_COILS", "write multiple coils"),
    ("MODBUS_FC_READ_MULTIPLE_DISCRETE_INPUTS", "read discrete inputs"),
    ("MODBUS_FC_READ_SINGLE_HOLDING_REGISTER", "read single holding register"),
    ("MODBUS_FC_READ_MULTIPLE_HOLDING_REGISTERS", "read multiple holding registers"),
    ("MODBUS_FC_WRITE_SINGLE_REGISTER", "write single holding register"),
    ("MODBUS_FC_WRITE_MULTIPLE_REGISTERS", "write multiple holding registers"),
    ("MODBUS_FC_WRITE_AND_READ_REGISTERS", "write and read holding registers"),
    ("MODBUS_FC_MASK_WRITE_REGISTER", "mask write holding register"),
    ("MODBUS_FC_READ_INPUT_REGISTERS", "read input register"),
    ("MODBUS_FC_READ_STRING", "read string"),
    ("MODBUS_FC_WRITE_STRING", "write string"),
    (FUNCTION_ALL, "unit test"),
];

/// Label for a function identifier, falling back to the identifier itself.
pub fn function_label(function_name: &str) -> &str {
    FUNCTION_LABELS
        .iter()
        .find(|(id, _)| *id == function_name)
        .map(|(_, label)| *label)
        .unwrap_or(function_name)
}
