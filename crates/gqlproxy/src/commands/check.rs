use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use gqlproxy_parser::ast::ParsedOperation;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct CheckCmd {
    #[arg(
        help="Path to a file holding a single GraphQL operation, or `-` to \
             read it from stdin.",
        name="QUERY_PATH",
    )]
    query_path: PathBuf,
}

impl CheckCmd {
    fn read_source(&self) -> std::io::Result<String> {
        if self.query_path.as_os_str() == "-" {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        } else {
            std::fs::read_to_string(&self.query_path)
        }
    }
}

fn describe(operation: &ParsedOperation) -> String {
    let mut out = format!(
        "{} Parsed {} operation {}:",
        output_utils::GREEN_CHECK,
        operation.operation_type,
        operation
            .operation_name
            .as_deref()
            .map(|name| format!("`{name}`"))
            .unwrap_or_else(|| "(anonymous)".to_string()),
    );
    for field in &operation.fields {
        out.push_str(&format!("\n  * {}", field.name));
        if !field.arguments.is_empty() {
            let names = field
                .arguments
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("({names})"));
        }
    }
    out
}

#[inherent::inherent]
impl RunnableCommand for CheckCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        log::debug!("Reading query from {:?}...", self.query_path);
        let source = match self.read_source() {
            Ok(source) => source,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Failed to read {:?}: {e}",
                    output_utils::RED_X,
                    self.query_path,
                ));
            },
        };

        match gqlproxy_parser::parse_query(&source) {
            Ok(operation) => CommandResult::stdout(format_args!("{}", describe(&operation))),
            Err(e) => CommandResult::stderr(format_args!(
                "{} {}",
                output_utils::RED_X,
                e.format_detailed(Some(&source)),
            )),
        }
    }
}
