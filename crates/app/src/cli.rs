use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Interface language for status and error messages (en, tr, ru, zh, ja).
    #[arg(long, global = true)]
    pub ui_lang: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a comment draft for a video.
    Generate(GenerateArgs),
    /// Post a comment to a video.
    Post(PostArgs),
    /// Show previously generated comments.
    History,
    /// Show the ads for one slot.
    Ads(AdsArgs),
    /// Manage ad creatives.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(long)]
    pub url: String,
    /// Comment language: English, Turkish, Russian, Chinese or Japanese.
    /// Defaults to the interface language.
    #[arg(long)]
    pub lang: Option<String>,
    /// Replace the generated text before posting.
    #[arg(long)]
    pub edit: Option<String>,
    /// Post the draft right after generating it.
    #[arg(long, default_value_t = false)]
    pub post: bool,
}

#[derive(Debug, Args)]
pub struct PostArgs {
    #[arg(long)]
    pub url: String,
    #[arg(long)]
    pub text: String,
}

#[derive(Debug, Args)]
pub struct AdsArgs {
    #[arg(long, default_value = "top")]
    pub slot: String,
    #[arg(long)]
    pub viewport_width: Option<u32>,
    /// Keep rotating for this many intervals.
    #[arg(long, default_value_t = 0)]
    pub watch: u32,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    Login {
        /// Falls back to COMMENDAI_ADMIN_PASSWORD.
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    Check,
    List,
    Create {
        #[arg(long)]
        content: String,
        #[arg(long)]
        link: Option<String>,
        #[arg(long, default_value = "left")]
        position: String,
        #[arg(long, default_value_t = false)]
        inactive: bool,
    },
    Update {
        id: i64,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: i64,
    },
    Toggle {
        id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_post() {
        let cli = Cli::parse_from([
            "commendai",
            "--ui-lang",
            "tr",
            "generate",
            "--url",
            "https://youtu.be/abc",
            "--lang",
            "Turkish",
            "--post",
        ]);
        assert_eq!(cli.ui_lang.as_deref(), Some("tr"));
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.url, "https://youtu.be/abc");
                assert_eq!(args.lang.as_deref(), Some("Turkish"));
                assert!(args.post);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_admin_update() {
        let cli = Cli::parse_from(["commendai", "admin", "update", "5", "--active", "false"]);
        match cli.command {
            Command::Admin {
                command: AdminCommand::Update { id, active, content, .. },
            } => {
                assert_eq!(id, 5);
                assert_eq!(active, Some(false));
                assert!(content.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
