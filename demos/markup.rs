//! Markup demo: compile a few directives and print the result.
//!
//! Runs without a terminal session; pipe it through `cat -v` to see the
//! escape sequences.

use tracing_subscriber::EnvFilter;
use weft::markup::{strip, Customs, MarkupCompiler};

fn main() -> weft::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let customs = Customs::new()
        .substitute("user", || std::env::var("USER").unwrap_or_else(|_| "anon".to_string()))
        .modify("shout", str::to_uppercase);
    let compiler = MarkupCompiler::for_terminal().with_customs(customs);

    let samples = [
        "[b]bold[/b] [d]dim[/d] [i]italic[/i] [u]underline[/u] [s]strike[/s] [r]reverse[/]",
        "[red]red [green]green [blue]blue [#ff8800]hex [120]xterm [255,0,128]rgb[/]",
        "[@blue white] on blue [/bg] back to default background[/]",
        "[stash][b yellow]stashed style[pop] restored",
        "[u ~https://example.com]a hyperlink[/~] and plain text",
        "[user b]hello $1[/] [shout]quiet words[/]",
        "[<20]left[^20]center[>20]right",
    ];

    for sample in samples {
        let compiled = compiler.compile(sample)?;
        println!("{compiled}");
        tracing::debug!(plain = %strip(&compiled), bytes = compiled.len(), "compiled");
    }

    match compiler.compile("[@notacolor]oops") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("{}{e}", compiler.compile("[b red]error:[/] ")?),
    }
    Ok(())
}
