use clap::{Args as ClapArgs, Parser, Subcommand};
use infogen_fetch::generation::GenerationConfig;
use infogen_fetch::generation::catalog::{DEFAULT_SIZE_ID, DEFAULT_STYLE_ID};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "infogen-fetch")]
#[command(about = "Fetch webpages and YouTube videos as infographic source content")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind, overrides the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Extract one URL and print the result as JSON
    Fetch {
        url: String,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the generation prompt for a URL or pasted text
    Prompt {
        /// URL to fetch, or text to summarize directly
        source: String,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Generate an infographic image for a URL, pasted text or slide images
    Generate(GenerateArgs),

    /// Generate a short video and print its download URI
    Video {
        /// Text prompt for the video
        prompt: String,

        /// Starting frame image
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// URL to fetch, or text to summarize directly; omit to summarize --image slides
    pub source: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Slide or source image, repeatable
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,

    /// Number of variations to request concurrently
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=8))]
    pub count: u32,

    /// Reference image for the custom style
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Output file; defaults to a name derived from the source title
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StyleArgs {
    /// Style id (see the style catalog), or "custom"
    #[arg(long, default_value = DEFAULT_STYLE_ID)]
    pub style: String,

    /// Output size id
    #[arg(long, default_value = DEFAULT_SIZE_ID)]
    pub size: String,

    /// Language for all text in the infographic
    #[arg(long, default_value = "한국어 (Korean)")]
    pub language: String,

    /// Colour preset, hex code or tone
    #[arg(long)]
    pub color: Option<String>,

    /// Extra instructions appended to the prompt
    #[arg(long)]
    pub instructions: Option<String>,
}

impl From<StyleArgs> for GenerationConfig {
    fn from(args: StyleArgs) -> Self {
        GenerationConfig {
            language: args.language,
            style_id: args.style,
            size: args.size,
            color: args.color,
            custom_instructions: args.instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_accepts_repeated_images_without_source() {
        let args = Args::try_parse_from([
            "infogen-fetch",
            "generate",
            "--image",
            "one.png",
            "--image",
            "two.png",
            "--count",
            "3",
        ])
        .unwrap();

        match args.command {
            Command::Generate(generate) => {
                assert!(generate.source.is_none());
                assert_eq!(
                    generate.images,
                    vec![PathBuf::from("one.png"), PathBuf::from("two.png")]
                );
                assert_eq!(generate.count, 3);
                assert_eq!(generate.style.style, DEFAULT_STYLE_ID);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_count_must_be_positive() {
        assert!(Args::try_parse_from(["infogen-fetch", "generate", "text", "-n", "0"]).is_err());
    }

    #[test]
    fn test_video_subcommand() {
        let args =
            Args::try_parse_from(["infogen-fetch", "video", "A sunrise", "--image", "frame.jpg"])
                .unwrap();
        match args.command {
            Command::Video { prompt, image } => {
                assert_eq!(prompt, "A sunrise");
                assert_eq!(image, Some(PathBuf::from("frame.jpg")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
