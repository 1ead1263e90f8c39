//! A channel-signup form: required and pattern rules, custom email checks,
//! a conditionally disabled field, and a dynamic phone-number array.
//!
//! Run with `cargo run --example signup`.

use formflow::core::logging::setup_logging;
use formflow::prelude::*;

fn build_form() -> Form {
    let mut registry = FieldRegistry::new();
    registry.register(
        FieldPath::root("username"),
        FieldRule::new().required("Username is required").initial(""),
    );
    registry.register(
        FieldPath::root("email"),
        FieldRule::new()
            .required("Email is required")
            .pattern_str(
                r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,})+$",
                "Invalid email address",
            )
            .unwrap()
            .validate(
                "not_admin",
                |v| v.as_str() != Some("admin@example.com"),
                "Enter a different email address",
            )
            .validate(
                "no_blacklisted",
                |v| v.as_str().map_or(true, |s| !s.ends_with("baddomain.com")),
                "This domain is not supported",
            )
            .initial(""),
    );
    registry.register(
        FieldPath::root("channel"),
        FieldRule::new().required("Channel name is compulsory").initial(""),
    );
    registry.register(FieldPath::root("age"), FieldRule::new().required("Age is compulsory"));
    registry.register(
        FieldPath::root("socials").key("twitter"),
        FieldRule::new()
            .required("Twitter is compulsory")
            .disabled_when(|values| {
                values
                    .get(&FieldPath::root("channel"))
                    .map_or(true, FormValue::is_empty)
            })
            .initial(""),
    );
    registry.register(
        FieldPath::root("socials").key("facebook"),
        FieldRule::new().required("Facebook is required").initial(""),
    );
    Form::new(registry)
}

fn report(form: &mut Form) {
    let submitted = form.handle_submit(
        |values| {
            println!("submitted:");
            for (path, value) in values {
                println!("  {path} = {value}");
            }
        },
        |errors| {
            println!("rejected:");
            for (path, error) in errors {
                println!("  {path}: {}", error.message());
            }
        },
    );
    println!("submitted = {submitted}\n");
}

fn main() {
    setup_logging("info", true);

    let mut form = build_form();
    let mut phones = FieldArray::new(FieldPath::root("phone_list"))
        .with_field("number", FieldRule::new().required("Phone number is required").initial(""))
        .with_min_len(1);
    phones.append(&mut form);

    // First attempt: everything empty.
    report(&mut form);

    // Fill the form in, including the phone entry added above plus a
    // second one appended pre-filled.
    let opts = SetValueOpts::validated();
    form.set_value(&FieldPath::root("username"), "alice", opts);
    form.set_value(&FieldPath::root("email"), "alice@example.com", opts);
    form.set_value(&FieldPath::root("channel"), "alice-codes", opts);
    form.set_value(&FieldPath::root("age"), 30, opts);
    form.set_value(&FieldPath::root("socials").key("twitter"), "@alice", opts);
    form.set_value(&FieldPath::root("socials").key("facebook"), "alice.fb", opts);
    form.set_value(&phones.field_path(0, "number"), "555-0100", opts);
    phones.append_with(&mut form, vec![("number".into(), "555-0199".into())]);

    // Programmatic update, the way a "fill for me" button would do it.
    form.set_value(&FieldPath::root("username"), "James", SetValueOpts::validated());

    report(&mut form);

    // Drop the second phone entry; the first is protected by min_len.
    phones.remove(&mut form, 1).unwrap();
    if let Err(err) = phones.remove(&mut form, 0) {
        println!("cannot remove last phone entry: {err}");
    }

    let snapshot = form.snapshot();
    println!(
        "\nsnapshot: dirty={} valid={}\n{}",
        snapshot.is_dirty,
        snapshot.is_valid,
        serde_json::to_string_pretty(&snapshot).unwrap()
    );
}
