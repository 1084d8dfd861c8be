diesel::table! {
    chat_turns (id) {
        id -> BigInt,
        sender -> Text,
        text -> Text,
        created_at -> BigInt,
    }
}
