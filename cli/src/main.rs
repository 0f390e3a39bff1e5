use std::path::PathBuf;

use clap::{Parser, Subcommand};

use carillon_cli::commands::{self, schedule::CopyScope};
use carillon_cli::{CliContext, readline};
use carillon_core::editor::{ActivityEdit, InterimEdit};
use carillon_core::{ApiClient, ConsoleConfig, EditorSession};
use carillon_types::AudioFolder;

/// Startup flags. Everything else happens inside the console.
#[derive(Parser)]
#[command(version, about = "Interactive console for a bell and announcement appliance")]
struct LaunchArgs {
    /// Appliance url for this session, overriding the configured one
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = LaunchArgs::parse();
    let _guard = carillon_cli::logging::init();

    let config = ConsoleConfig::load();
    let url = args.url.unwrap_or_else(|| config.appliance_url.clone());
    let client = ApiClient::new(&url, config.timeout()).map_err(|e| e.to_string())?;

    println!("carillon console, appliance at {url}");
    let mut session = EditorSession::new(client);
    match session.load().await {
        Ok(()) => println!("schedule loaded; type 'help' for commands"),
        Err(err) => {
            println!("could not load the schedule: {err}");
            println!("commands still work; run 'reload' to retry");
        }
    }
    let ctx = CliContext::new(config, session);

    loop {
        let Some(line) = readline()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => println!("{}", err.trim_end()),
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "carillon", version, about = "appliance console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the whole week at a glance
    Week,
    /// Show one day's activities
    Show {
        /// Day index 0-6 or name; defaults to the active day
        day: Option<String>,
    },
    /// Pick the day subsequent edits apply to
    Day { day: String },
    /// Let a day's schedule ring
    Enable { day: Option<String> },
    /// Keep a day silent
    Disable { day: Option<String> },
    /// Add an activity; times follow the day's latest end
    Add {
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Remove an activity
    Rm {
        activity: String,
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Change fields of an activity
    Edit {
        activity: String,
        #[arg(short, long)]
        day: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// Start time, HH:MM
        #[arg(long)]
        start: Option<String>,
        /// End time, HH:MM
        #[arg(long)]
        end: Option<String>,
        /// Bell sound at the start edge
        #[arg(long)]
        start_sound: Option<String>,
        /// Bell sound at the end edge
        #[arg(long)]
        end_sound: Option<String>,
        /// Announcement at the start edge; "None" clears it
        #[arg(long)]
        start_announcement: Option<String>,
        /// Announcement at the end edge; "None" clears it
        #[arg(long)]
        end_announcement: Option<String>,
        /// Whether ambient music may play during the activity
        #[arg(long)]
        music: Option<bool>,
    },
    /// Interim announcements inside an activity
    Interim {
        #[command(subcommand)]
        command: InterimCommands,
    },
    /// Copy the active day's schedule onto other days
    Copy {
        #[arg(value_enum)]
        scope: CopyScope,
    },
    /// Push the draft to the appliance
    Save,
    /// Discard the draft and fetch the schedule again
    Reload,

    /// Appliance state, playback, and next event
    Status,
    /// Today's computed bell timeline
    Timeline,
    /// Poll status continuously until Ctrl-C
    Watch {
        /// Seconds between polls
        #[arg(short, long, default_value_t = 2)]
        interval: u64,
    },

    /// Sound files stored on the appliance
    Files {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Sound options the editor currently offers
    Sounds,

    /// Music playback and volumes
    Player {
        #[command(subcommand)]
        command: PlayerCommands,
    },
    /// Stop whatever the appliance is playing
    Stop,
    /// Speak a text over the speakers
    Announce {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Start or stop the bell scheduler
    Scheduler {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },

    /// Public holiday handling
    Holidays {
        #[command(subcommand)]
        command: HolidayCommands,
    },
    /// Birthday announcements
    Special {
        #[command(subcommand)]
        command: SpecialCommands,
    },

    /// Console configuration and appliance settings
    Settings,
    /// Change a setting
    Set {
        #[command(subcommand)]
        command: SetCommands,
    },

    /// Appliance backup
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },

    /// Leave the console
    #[command(alias = "quit")]
    Exit,
}

#[derive(Subcommand)]
enum InterimCommands {
    /// Add an interim announcement to an activity
    Add {
        activity: String,
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Remove an interim announcement
    Rm {
        activity: String,
        announcement: String,
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Change time, sound, or enabled state
    Edit {
        activity: String,
        announcement: String,
        #[arg(short, long)]
        day: Option<String>,
        /// HH:MM
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        sound: Option<String>,
        #[arg(long)]
        enabled: Option<bool>,
    },
}

#[derive(Subcommand)]
enum FileCommands {
    /// List a folder (bells, music, announcements)
    List { folder: AudioFolder },
    /// Upload local .mp3 files to a folder
    Upload {
        folder: AudioFolder,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Delete a file from a folder
    Rm { folder: AudioFolder, filename: String },
    /// Play a file on the appliance once
    Preview { folder: AudioFolder, filename: String },
}

#[derive(Subcommand)]
enum PlayerCommands {
    /// Start or stop manual ambient music
    Music {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
    /// Set the active channel's volume (0-100)
    Volume { value: u32 },
    /// Show or set per-channel volumes
    Volumes {
        #[arg(long)]
        bell: Option<u32>,
        #[arg(long)]
        music: Option<u32>,
        #[arg(long)]
        manual: Option<u32>,
    },
    /// Switch music between local files and internet radio
    Source {
        #[arg(value_parser = ["local", "radio"])]
        source: String,
    },
    /// Set the radio stream url
    Radio { url: String },
}

#[derive(Subcommand)]
enum HolidayCommands {
    /// This year's holidays and how each is handled
    List,
    /// Keep the bells silent on a holiday (YYYY-MM-DD)
    Skip { date: String },
    /// Ring normally on a holiday again
    Unskip { date: String },
    /// Country the holiday calendar comes from (two-letter code)
    Country { code: String },
}

#[derive(Subcommand)]
enum SpecialCommands {
    /// Configuration and the birthday roster
    Show,
    /// Turn automatic announcements on
    Enable,
    /// Turn automatic announcements off
    Disable,
    /// Times of day the announcements fire (HH:MM)
    Times {
        #[arg(required = true)]
        times: Vec<String>,
    },
    /// Announcement text; {name} is replaced with the person's name
    Template {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Add a person (date: MM-DD or YYYY-MM-DD)
    Add { name: String, date: String },
    /// Remove a person
    Rm { name: String },
    /// Play someone's announcement now
    Announce { name: String },
    /// Stop a running announcement
    Stop,
}

#[derive(Subcommand)]
enum SetCommands {
    /// Appliance base url (persisted)
    Url { url: String },
    /// Request timeout in seconds (persisted)
    Timeout { seconds: u64 },
    /// Company name the appliance displays and announces
    Company {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Whether the scheduler starts when the appliance boots
    Boot {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
    /// Text-to-speech engine identifier
    TtsEngine { engine: String },
}

#[derive(Subcommand)]
enum BackupCommands {
    /// Save the appliance's full export locally
    Export { path: Option<PathBuf> },
    /// Restore a previously exported backup
    Import { path: PathBuf },
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: invalid quoting")?;
    args.insert(0, "carillon".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Week) => commands::schedule::week(ctx).await?,
        Some(Commands::Show { day }) => commands::schedule::show(ctx, day.as_deref()).await?,
        Some(Commands::Day { day }) => commands::schedule::select_day(ctx, &day).await?,
        Some(Commands::Enable { day }) => {
            commands::schedule::set_enabled(ctx, day.as_deref(), true).await?
        }
        Some(Commands::Disable { day }) => {
            commands::schedule::set_enabled(ctx, day.as_deref(), false).await?
        }
        Some(Commands::Add { day }) => commands::schedule::add_activity(ctx, day.as_deref()).await?,
        Some(Commands::Rm { activity, day }) => {
            commands::schedule::remove_activity(ctx, &activity, day.as_deref()).await?
        }
        Some(Commands::Edit {
            activity,
            day,
            name,
            start,
            end,
            start_sound,
            end_sound,
            start_announcement,
            end_announcement,
            music,
        }) => {
            let edit = ActivityEdit {
                name,
                start_time: start,
                end_time: end,
                start_sound_id: start_sound,
                end_sound_id: end_sound,
                start_announcement_id: start_announcement,
                end_announcement_id: end_announcement,
                play_music: music,
            };
            commands::schedule::edit_activity(ctx, &activity, day.as_deref(), edit).await?
        }
        Some(Commands::Interim { command }) => match command {
            InterimCommands::Add { activity, day } => {
                commands::schedule::add_interim(ctx, &activity, day.as_deref()).await?
            }
            InterimCommands::Rm {
                activity,
                announcement,
                day,
            } => {
                commands::schedule::remove_interim(ctx, &activity, &announcement, day.as_deref())
                    .await?
            }
            InterimCommands::Edit {
                activity,
                announcement,
                day,
                time,
                sound,
                enabled,
            } => {
                let edit = InterimEdit {
                    time,
                    sound_id: sound,
                    enabled,
                };
                commands::schedule::edit_interim(ctx, &activity, &announcement, day.as_deref(), edit)
                    .await?
            }
        },
        Some(Commands::Copy { scope }) => commands::schedule::copy(ctx, scope).await?,
        Some(Commands::Save) => commands::schedule::save(ctx).await?,
        Some(Commands::Reload) => commands::schedule::reload(ctx).await?,

        Some(Commands::Status) => commands::status::status(ctx).await?,
        Some(Commands::Timeline) => commands::status::timeline(ctx).await?,
        Some(Commands::Watch { interval }) => commands::status::watch(ctx, interval).await?,

        Some(Commands::Files { command }) => match command {
            FileCommands::List { folder } => commands::library::list(ctx, folder).await?,
            FileCommands::Upload { folder, paths } => {
                commands::library::upload(ctx, folder, paths).await?
            }
            FileCommands::Rm { folder, filename } => {
                commands::library::delete(ctx, folder, &filename).await?
            }
            FileCommands::Preview { folder, filename } => {
                commands::library::preview(ctx, folder, &filename).await?
            }
        },
        Some(Commands::Sounds) => commands::library::sounds(ctx).await?,

        Some(Commands::Player { command }) => match command {
            PlayerCommands::Music { state } => {
                commands::player::music(ctx, state == "on").await?
            }
            PlayerCommands::Volume { value } => commands::player::volume(ctx, value).await?,
            PlayerCommands::Volumes { bell, music, manual } => {
                commands::player::volumes(ctx, bell, music, manual).await?
            }
            PlayerCommands::Source { source } => commands::player::source(ctx, &source).await?,
            PlayerCommands::Radio { url } => commands::player::radio(ctx, &url).await?,
        },
        Some(Commands::Stop) => commands::library::stop(ctx).await?,
        Some(Commands::Announce { text }) => {
            commands::player::announce(ctx, &text.join(" ")).await?
        }
        Some(Commands::Scheduler { state }) => {
            commands::player::scheduler(ctx, state == "on").await?
        }

        Some(Commands::Holidays { command }) => match command {
            HolidayCommands::List => commands::holidays::list(ctx).await?,
            HolidayCommands::Skip { date } => commands::holidays::skip(ctx, &date).await?,
            HolidayCommands::Unskip { date } => commands::holidays::unskip(ctx, &date).await?,
            HolidayCommands::Country { code } => commands::holidays::country(ctx, &code).await?,
        },

        Some(Commands::Special { command }) => match command {
            SpecialCommands::Show => commands::special::show(ctx).await?,
            SpecialCommands::Enable => commands::special::set_enabled(ctx, true).await?,
            SpecialCommands::Disable => commands::special::set_enabled(ctx, false).await?,
            SpecialCommands::Times { times } => commands::special::times(ctx, times).await?,
            SpecialCommands::Template { text } => {
                commands::special::template(ctx, &text.join(" ")).await?
            }
            SpecialCommands::Add { name, date } => {
                commands::special::add(ctx, &name, &date).await?
            }
            SpecialCommands::Rm { name } => commands::special::remove(ctx, &name).await?,
            SpecialCommands::Announce { name } => {
                commands::special::announce(ctx, &name).await?
            }
            SpecialCommands::Stop => commands::special::stop(ctx).await?,
        },

        Some(Commands::Settings) => commands::settings::show(ctx).await?,
        Some(Commands::Set { command }) => match command {
            SetCommands::Url { url } => commands::settings::set_url(ctx, &url).await?,
            SetCommands::Timeout { seconds } => {
                commands::settings::set_timeout(ctx, seconds).await?
            }
            SetCommands::Company { name } => {
                commands::settings::company(ctx, &name.join(" ")).await?
            }
            SetCommands::Boot { state } => {
                commands::settings::boot(ctx, state == "on").await?
            }
            SetCommands::TtsEngine { engine } => {
                commands::settings::tts_engine(ctx, &engine).await?
            }
        },

        Some(Commands::Backup { command }) => match command {
            BackupCommands::Export { path } => commands::backup::export(ctx, path).await?,
            BackupCommands::Import { path } => commands::backup::import(ctx, path).await?,
        },

        Some(Commands::Exit) => return Ok(true),
        None => {}
    }
    Ok(false)
}
