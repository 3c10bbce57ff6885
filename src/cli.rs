//! Command-line surface

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::registry::{
    choices_help, AVERAGE_TYPES, DITHER_TYPES, EDGE_MODES, PALETTE_FORMATS, RESIZE_FILTERS,
    TEXTURE_FORMATS,
};

pub const DEFAULT_TEXTURE_FORMAT: &str = "RGBA8";
pub const DEFAULT_PALETTE_FORMAT: &str = "RGB5A3";
pub const DEFAULT_MIP_LIMIT: u8 = 1;
pub const DEFAULT_WIDTH_LIMIT: u16 = 1;
pub const DEFAULT_HEIGHT_LIMIT: u16 = 1;
pub const DEFAULT_AVERAGE_TYPE: &str = "AVERAGE";
pub const DEFAULT_EDGE_MODE: &str = "CLAMP";
pub const DEFAULT_FILTER: &str = "DEFAULT";
pub const DEFAULT_DITHER_TYPE: &str = "THRESHOLD";

/// txtrtool - Metroid Prime TXTR converter
#[derive(Parser, Debug)]
#[command(name = "txtrtool")]
#[command(version, long_about = None)]
#[command(about = "Decodes and encodes TXTR files from Metroid Prime 1, 2: Echoes, and 3: Corruption.")]
pub struct Cli {
    /// Enable verbose diagnostics (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a TXTR to a TGA.
    #[command(override_usage = "txtrtool decode [OPTIONS] <input txtr> <output tga or directory>")]
    Decode(DecodeArgs),

    /// Encode a TGA to a TXTR.
    #[command(disable_help_flag = true)]
    #[command(override_usage = "txtrtool encode [OPTIONS] <input tga> <output txtr>")]
    Encode(EncodeArgs),

    /// Print information of a TXTR such as its format, dimensions, etc.
    #[command(override_usage = "txtrtool print [OPTIONS] <input txtr>")]
    Print(PrintArgs),

    /// Print the version.
    Version,
}

/// Stream suppression shared by every subcommand
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct StreamArgs {
    /// Do not print output.
    #[arg(short = 's', long)]
    pub nooutp: bool,

    /// Do not print errors.
    #[arg(short = 'e', long)]
    pub noerrp: bool,
}

/// Prompt answers for subcommands that write files
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ConfirmArgs {
    /// Assume yes to every prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Assume no to every prompt.
    #[arg(short = 'n', long)]
    pub no: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub streams: StreamArgs,

    #[command(flatten)]
    pub confirm: ConfirmArgs,

    /// Decode all mipmaps from the TXTR. Outputs to a directory instead.
    #[arg(short, long)]
    pub mipmaps: bool,

    /// Prefix for each mipmap file name. This only has effect if --mipmaps specified.
    #[arg(short = 'b', long, value_name = "string", default_value = "")]
    pub prefix: String,

    /// Suffix for each mipmap file name. This only has effect if --mipmaps specified.
    #[arg(short = 'a', long, value_name = "string", default_value = "")]
    pub suffix: String,

    #[arg(value_name = "OPERANDS")]
    pub operands: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub streams: StreamArgs,

    #[command(flatten)]
    pub confirm: ConfirmArgs,

    #[arg(
        short = 't',
        long,
        value_name = "string",
        default_value = DEFAULT_TEXTURE_FORMAT,
        help = choices_help("The texture format to set for the output TXTR.", &TEXTURE_FORMATS),
    )]
    pub texfmt: String,

    #[arg(
        short = 'p',
        long,
        value_name = "string",
        default_value = DEFAULT_PALETTE_FORMAT,
        help = choices_help("For CI4, CI8, and CI14X2: The palette format to set for the output TXTR.", &PALETTE_FORMATS),
    )]
    pub palfmt: String,

    /// The maximum limit of mipmaps to encode. 0 means no limit ergo 11 mipmaps. For CI4, CI8, and
    /// CI14X2 this must be 1 or 0, and 0 means 1.
    #[arg(short = 'm', long, value_name = "uint8", default_value_t = DEFAULT_MIP_LIMIT)]
    pub miplimit: u8,

    /// The minimum limit of mipmap width. Must be greater than 0.
    #[arg(short = 'w', long, value_name = "uint16", default_value_t = DEFAULT_WIDTH_LIMIT)]
    pub widthlimit: u16,

    /// The minimum limit of mipmap height. Must be greater than 0.
    #[arg(short = 'h', long, value_name = "uint16", default_value_t = DEFAULT_HEIGHT_LIMIT)]
    pub heightlimit: u16,

    #[arg(
        long,
        value_name = "string",
        default_value = DEFAULT_AVERAGE_TYPE,
        help = choices_help("For I4, I8, IA4, and IA8: The formula to use for greyscaling.", &AVERAGE_TYPES),
    )]
    pub avgtype: String,

    #[arg(
        long,
        value_name = "string",
        default_value = DEFAULT_EDGE_MODE,
        help = choices_help("The type of edge mode to use for mipmaps.", &EDGE_MODES),
    )]
    pub stbiredge: String,

    #[arg(
        long,
        value_name = "string",
        default_value = DEFAULT_FILTER,
        help = choices_help("The type of filter to use for mipmaps.", &RESIZE_FILTERS),
    )]
    pub stbirfilter: String,

    #[arg(
        long,
        value_name = "string",
        default_value = DEFAULT_DITHER_TYPE,
        help = choices_help("For CI4, CI8, and CI14X2: The type of dither operation during quantization.", &DITHER_TYPES),
    )]
    pub dithertype: String,

    /// For CMP: An optional perceptual metric used to weight the relative importance of each
    /// colour channel. [default: 1.0,1.0,1.0]
    #[arg(long, value_name = "float,float,float", value_delimiter = ',', allow_hyphen_values = true)]
    pub squishmetric: Option<Vec<f32>>,

    /// For CMP: Weight the color by alpha during cluster fit. This has no effect if
    /// --squishrangefit specified.
    #[arg(long)]
    pub squishalphaweight: bool,

    /// For CMP: Use a slow but high quality compressor (Default).
    #[arg(long)]
    pub squishclusterfit: bool,

    /// For CMP: Use a fast but low quality compressor.
    #[arg(long)]
    pub squishrangefit: bool,

    /// For CMP: Use a very slow but very high quality compressor.
    #[arg(long)]
    pub squishiterclusterfit: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    #[arg(value_name = "OPERANDS")]
    pub operands: Vec<String>,
}

impl Default for EncodeArgs {
    fn default() -> Self {
        Self {
            streams: StreamArgs::default(),
            confirm: ConfirmArgs::default(),
            texfmt: DEFAULT_TEXTURE_FORMAT.to_string(),
            palfmt: DEFAULT_PALETTE_FORMAT.to_string(),
            miplimit: DEFAULT_MIP_LIMIT,
            widthlimit: DEFAULT_WIDTH_LIMIT,
            heightlimit: DEFAULT_HEIGHT_LIMIT,
            avgtype: DEFAULT_AVERAGE_TYPE.to_string(),
            stbiredge: DEFAULT_EDGE_MODE.to_string(),
            stbirfilter: DEFAULT_FILTER.to_string(),
            dithertype: DEFAULT_DITHER_TYPE.to_string(),
            squishmetric: None,
            squishalphaweight: false,
            squishclusterfit: false,
            squishrangefit: false,
            squishiterclusterfit: false,
            help: None,
            operands: Vec::new(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PrintArgs {
    #[command(flatten)]
    pub streams: StreamArgs,

    /// Print output to JSON formatted data.
    #[arg(short, long)]
    pub json: bool,

    #[arg(value_name = "OPERANDS")]
    pub operands: Vec<String>,
}
