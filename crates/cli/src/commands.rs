use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a filter tree into a query fragment and its parameters
    Compile {
        #[arg(long, help = "Filter tree JSON file path, or '-' for stdin")]
        file: String,

        /// Target dialect: "sqlserver", "mysql", "pg", "linq", …
        #[arg(long, default_value = "sqlserver")]
        dialect: String,

        #[arg(
            long,
            help = "Pair every parameter with its placeholder name instead of a plain array"
        )]
        named: bool,

        #[arg(
            long,
            help = "If specified, writes the compiled filter to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// List the operators a dialect understands
    Operators {
        #[arg(long, default_value = "sqlserver")]
        dialect: String,
    },
}
