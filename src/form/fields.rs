//! Field keys and the label catalog used by the preview.

pub const AGREEMENT_NUMBER: &str = "agreement_number";
pub const AGREEMENT_DATE: &str = "agreement_date";
pub const NAME: &str = "name";
pub const NATIONALITY: &str = "nationality";
pub const PHONE: &str = "phone";
pub const CITIZEN: &str = "citizen";
pub const PASSPORT: &str = "passport";
pub const REMAINING_DATE: &str = "remaining_date";
/// Check-in date.
pub const CHECK_IN: &str = "v1";
/// Check-out date.
pub const CHECK_OUT: &str = "v2";
/// Rent description.
pub const RENT_DESCRIPTION: &str = "v3";
/// Total rent.
pub const TOTAL_RENT: &str = "v4";
/// Received rent (advance).
pub const RECEIVED_RENT: &str = "v5";
/// Remaining rent, numeric or annotated with the promised payment date.
pub const REMAINING_RENT: &str = "v6";
/// Insurance / deposit.
pub const DEPOSIT: &str = "v7";
/// Room identifier, also the download filename stem.
pub const ROOM: &str = "v8";

/// Canonical order in which the form lays out its fields.
pub const FORM_FIELDS: [&str; 16] = [
    AGREEMENT_NUMBER,
    AGREEMENT_DATE,
    NAME,
    NATIONALITY,
    PHONE,
    CITIZEN,
    PASSPORT,
    CHECK_IN,
    CHECK_OUT,
    RENT_DESCRIPTION,
    TOTAL_RENT,
    RECEIVED_RENT,
    REMAINING_RENT,
    REMAINING_DATE,
    DEPOSIT,
    ROOM,
];

/// Fields the form marks as required.
pub const REQUIRED_FIELDS: [&str; 6] = [NAME, PHONE, CHECK_IN, CHECK_OUT, TOTAL_RENT, ROOM];

/// Keys whose values are reformatted as display dates in the payload.
pub const PAYLOAD_DATE_FIELDS: [&str; 3] = [AGREEMENT_DATE, CHECK_IN, CHECK_OUT];

/// Display label for a field key, if the catalog knows it.
pub fn label_for(key: &str) -> Option<&'static str> {
    let label = match key {
        AGREEMENT_NUMBER => "Agreement Number",
        AGREEMENT_DATE => "Agreement Date",
        NAME => "Full Name",
        NATIONALITY => "Nationality",
        PHONE => "Phone Number",
        CITIZEN => "Residence Type",
        PASSPORT => "Passport/ID Number",
        REMAINING_DATE => "Remaining Date",
        CHECK_IN => "Check-in Date",
        CHECK_OUT => "Check-out Date",
        RENT_DESCRIPTION => "Rent Description",
        TOTAL_RENT => "Total Rent",
        RECEIVED_RENT => "Received Rent",
        REMAINING_RENT => "Remaining Rent",
        DEPOSIT => "Insurance/Deposit",
        ROOM => "Room Details",
        _ => return None,
    };
    Some(label)
}

/// Label for a field, falling back to the raw key.
pub fn display_label(key: &str) -> &str {
    label_for(key).unwrap_or(key)
}

pub fn is_required(key: &str) -> bool {
    REQUIRED_FIELDS.contains(&key)
}
