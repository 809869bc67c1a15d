//! `promptsmith select` — Choose techniques for a piece of text.

use promptsmith_core::{Complexity, ComplexityLevel, SelectionRequest, SelectionResponse};

pub struct SelectArgs {
    pub text: String,
    pub intent: Option<String>,
    pub complexity: Option<ComplexityLevel>,
    pub score: Option<f64>,
    pub json: bool,
}

pub fn run(args: SelectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, selector) = super::load_selector()?;

    let request = SelectionRequest {
        text: args.text,
        intent: args.intent,
        complexity: Complexity {
            level: args.complexity,
            score: args.score,
        },
    };
    let response = selector.select(&request);

    if args.json || config.json_output() {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render(&response, config.output.show_reasoning));
    }
    Ok(())
}

fn render(response: &SelectionResponse, show_reasoning: bool) -> String {
    let mut out = String::new();
    if response.is_empty() {
        out.push_str("No techniques selected.\n");
    } else {
        out.push_str("Techniques:\n");
        for (i, t) in response.techniques.iter().enumerate() {
            let marker = if i == 0 { "*" } else { " " };
            out.push_str(&format!(
                "  {marker} {}. {} (score {}, template {})\n",
                i + 1,
                t.id,
                t.score,
                t.template
            ));
        }
    }
    let advisory = if response.meets_min_confidence {
        ""
    } else {
        " (below advisory threshold)"
    };
    out.push_str(&format!(
        "Confidence: {:.2}{advisory}\nComplexity: {:.2}\n",
        response.confidence, response.complexity_score
    ));
    if show_reasoning {
        out.push_str(&format!("Reasoning:  {}\n", response.reasoning));
    }
    out
}
