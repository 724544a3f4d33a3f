use anyhow::Context;
use tracing_subscriber::EnvFilter;

const SAMPLES: [&str; 2] = [
    r#"{"value":1,"bool":true,"array":[1.2,5,7]}"#,
    r#"[{"value":1.2,"bool":true,"array":[1,2,5,7]},{"value":1.2,"bool":false,"array":[1,2,5,7]}]"#,
];

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<&str> = if args.is_empty() {
        SAMPLES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for (i, input) in inputs.iter().enumerate() {
        if i > 0 {
            println!("--------------------------");
        }
        let value = minijson::parse_json(input).with_context(|| format!("parsing {}", input))?;
        println!("{:#?}", value);
    }
    Ok(())
}
