//! Seam between the command layer and the container/pixel collaborators

use txtrtool_codec::{DecodeError, DecodeOptions, EncodeError, EncodeOptions, RgbaImage};
use txtrtool_core::CancelToken;
use txtrtool_formats::{
    PaletteFormat, TextureFormat, Tga, TgaReadError, TgaWriteError, Txtr, TxtrReadError,
    TxtrWriteError,
};

/// Source image and target formats of one encode call
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    pub format: TextureFormat,
    pub palette_format: PaletteFormat,
    pub width: u16,
    pub height: u16,
    /// Top-down RGBA8 pixels
    pub pixels: &'a [u8],
}

/// Everything the subcommand tasks need from the collaborators
pub trait Codec {
    fn read_txtr(&self, data: &[u8]) -> Result<Txtr, TxtrReadError>;

    fn write_txtr(&self, txtr: &Txtr, cancel: &CancelToken) -> Result<Vec<u8>, TxtrWriteError>;

    fn decode_txtr(
        &self,
        txtr: &Txtr,
        options: &DecodeOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<RgbaImage>, DecodeError>;

    fn encode_txtr(
        &self,
        request: EncodeRequest<'_>,
        options: &EncodeOptions,
        cancel: &CancelToken,
    ) -> Result<Txtr, EncodeError>;

    fn read_tga(&self, data: &[u8]) -> Result<Tga, TgaReadError>;

    fn write_tga(&self, tga: &Tga) -> Result<Vec<u8>, TgaWriteError>;
}

/// The in-tree collaborators
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeCodec;

impl Codec for NativeCodec {
    fn read_txtr(&self, data: &[u8]) -> Result<Txtr, TxtrReadError> {
        Txtr::read(data)
    }

    fn write_txtr(&self, txtr: &Txtr, cancel: &CancelToken) -> Result<Vec<u8>, TxtrWriteError> {
        txtr.write(cancel)
    }

    fn decode_txtr(
        &self,
        txtr: &Txtr,
        options: &DecodeOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<RgbaImage>, DecodeError> {
        txtrtool_codec::decode(txtr, options, cancel)
    }

    fn encode_txtr(
        &self,
        request: EncodeRequest<'_>,
        options: &EncodeOptions,
        cancel: &CancelToken,
    ) -> Result<Txtr, EncodeError> {
        txtrtool_codec::encode(
            request.format,
            request.palette_format,
            request.width,
            request.height,
            request.pixels,
            options,
            cancel,
        )
    }

    fn read_tga(&self, data: &[u8]) -> Result<Tga, TgaReadError> {
        Tga::read(data)
    }

    fn write_tga(&self, tga: &Tga) -> Result<Vec<u8>, TgaWriteError> {
        tga.write()
    }
}
