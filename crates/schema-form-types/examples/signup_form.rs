// Headless drive of a signup-style form: edit fields, watch the aggregate
// recompute, and submit once everything decodes.

use schema_form::{format_errors, FormSnapshot, SchemaForm};
use schema_form_types::{chain, number, number_from_string, object, text};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    name: String,
    age: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let mut form = SchemaForm::builder(
        object::<User>()
            .property(
                "name",
                text()
                    .non_empty("is required")
                    .max_length(30, "cannot exceed 30 characters")
                    .pattern(r"^[a-zA-Z .\-]+$", "may only contain letters, spaces, and dashes"),
            )
            .property(
                "age",
                number()
                    .non_negative("cannot be negative")
                    .finite("must be finite"),
            ),
    )
    .initial_values(
        json!({"name": "123", "age": "abc"})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    )
    .on_submit(|user: User| println!("registered {} (age {})", user.name, user.age))
    .build();

    let handle = form.handle();
    handle.subscribe(|context| match &context.errors {
        Some(errors) => println!("form invalid: {}", format_errors(errors)),
        None => println!("form valid"),
    });

    let mut name = form.field("name", text().non_empty("is required"));
    let mut age = form.field(
        "age",
        chain(
            chain(text().non_empty("is required"), number_from_string()),
            number()
                .non_negative("cannot be negative")
                .finite("must be finite"),
        ),
    );

    // A couple of rejected edits first
    name.on_change("Alice".to_string());
    age.on_change("abc".to_string());
    age.on_change("-5".to_string());

    // Submission is refused while the aggregate has errors
    form.submit();

    // Fix the field and submit for real
    age.on_change("30".to_string());
    form.submit();

    println!("{}", FormSnapshot::capture(&handle).to_json_pretty());
}
