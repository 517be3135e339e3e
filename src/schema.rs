// Table definitions for the SQLite schema created by `DbContext::init_schema`.

diesel::table! {
    orders (id) {
        id -> Integer,
        patient_first_name -> Text,
        patient_last_name -> Text,
        patient_dob -> Text,
    }
}

diesel::table! {
    audit_logs (id) {
        id -> Integer,
        user_id -> Text,
        action -> Text,
        timestamp -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(orders, audit_logs);
