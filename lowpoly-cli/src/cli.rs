use std::path::PathBuf;

use clap::{Parser, ValueHint};

#[derive(Clone, Debug, Parser)]
#[command(name = "lowpoly", version, author, about)]
#[command(help_template = "\
{name} {version}
{about}
{author}

{usage-heading}
{tab}{usage}

{all-args}
")]
pub struct CliArgs {
    /// Input image file stored in ./input_imgs
    #[arg(short, long, value_name = "FILE", value_hint(ValueHint::FilePath))]
    pub image: PathBuf,

    /// Output file name which will be stored in ./lowpoly; defaults to input image name
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Detail level (0 or more) that determines number of vertices
    #[arg(short = 'N', long, value_name = "INTEGER", default_value_t = 45)]
    pub size: usize,

    /// Also produce GIF animation of the mesh growth
    #[arg(short, long)]
    pub gif: bool,

    /// Settings file (JSON or YAML)
    #[arg(long, value_name = "PATH", value_hint(ValueHint::FilePath))]
    pub settings: Option<PathBuf>,

    /// Also produce importance map image
    #[arg(long)]
    pub importance: bool,

    /// Display settings used and progress
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Output name: explicit one or input file name up to its first dot.
    pub fn output_name(&self) -> String {
        match &self.output {
            Some(output) => output.clone(),
            None => self
                .image
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.split('.').next())
                .unwrap_or("out")
                .to_owned(),
        }
    }
}
