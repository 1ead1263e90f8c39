//! The same three-field form validated by both schema DSLs.
//!
//! Run with `cargo run --example schema`.

use formflow::core::logging::setup_logging;
use formflow::prelude::*;

fn bare_registry() -> FieldRegistry {
    let mut registry = FieldRegistry::new();
    registry.register(FieldPath::root("username"), FieldRule::new().initial(""));
    registry.register(FieldPath::root("email"), FieldRule::new().initial(""));
    registry.register(FieldPath::root("channel"), FieldRule::new().initial(""));
    registry
}

fn run(label: &str, schema: Box<dyn SchemaValidator>) {
    println!("--- {label} ---");
    let mut form = Form::new(bare_registry()).with_schema(schema);

    form.set_value(&FieldPath::root("email"), "admin@example.com", SetValueOpts::default());
    form.handle_submit(
        |_| println!("unexpectedly valid"),
        |errors| {
            for (path, error) in errors {
                println!("{path}: {}", error.message());
            }
        },
    );

    form.set_value(&FieldPath::root("username"), "alice", SetValueOpts::default());
    form.set_value(&FieldPath::root("email"), "alice@example.com", SetValueOpts::default());
    form.set_value(&FieldPath::root("channel"), "alice-codes", SetValueOpts::default());
    let ok = form.handle_submit(|_| {}, |_| {});
    println!("resubmitted ok = {ok}\n");
}

fn main() {
    setup_logging("debug", true);

    let pattern = PatternSchema::new()
        .require(FieldPath::root("username"), "Username is required")
        .require(FieldPath::root("email"), "Email is required")
        .email(FieldPath::root("email"), "Email format is not valid")
        .refine(
            FieldPath::root("email"),
            |v| v.as_str() != Some("admin@example.com"),
            "Enter a different email address",
        )
        .require(FieldPath::root("channel"), "Channel is required");

    let object = ObjectSchema::new()
        .field("username", string().nonempty("Username is required"))
        .field(
            "email",
            string()
                .nonempty("Email is required")
                .email("Email format is not valid")
                .refine(
                    |v| v.as_str() != Some("admin@example.com"),
                    "Enter a different email address",
                ),
        )
        .field("channel", string().nonempty("Channel is required"));

    run("pattern schema", Box::new(pattern));
    run("object schema", Box::new(object));
}
