use std::collections::HashMap;

pub fn builtin_scripts() -> HashMap<&'static str, &'static str> {
    HashMap::from([(
        "best_of_three",
        include_str!("../content/scripts/best_of_three.json"),
    )])
}
