#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let seed = input.chars().take(32).collect::<String>();
        let mut vars = BTreeMap::new();
        vars.insert("id", "1");
        vars.insert("name", seed.as_str());
        if let Ok(template) = csvreq::fuzzing::parse_template_input(input) {
            let rendered = template.render(&vars);
            if template.placeholders().all(|name| vars.contains_key(name)) {
                debug_assert!(rendered.is_ok());
            }
        }
        let _ = csvreq::fuzzing::render_template_input(input, &vars);
    }
});
