//! 8x8 piece bitmaps at the framebuffer's square size.
//!
//! White pieces are outlines, black pieces solid silhouettes, so the two
//! sides stay readable on a 1-bit display. Bit 7 of each row byte is the
//! leftmost pixel.

use crate::domain::{Piece, PieceKind, Side};

pub(crate) type Glyph = [u8; 8];

const WHITE_PAWN: Glyph = [
    0b00000000, //
    0b00011000, //    ##
    0b00100100, //   #  #
    0b00011000, //    ##
    0b00100100, //   #  #
    0b00100100, //   #  #
    0b01111110, //  ######
    0b00000000, //
];

const BLACK_PAWN: Glyph = [
    0b00000000, //
    0b00011000, //    ##
    0b00111100, //   ####
    0b00011000, //    ##
    0b00111100, //   ####
    0b00111100, //   ####
    0b01111110, //  ######
    0b00000000, //
];

const WHITE_KNIGHT: Glyph = [
    0b00000000, //
    0b00011100, //    ###
    0b00110010, //   ##  #
    0b01001110, //  #  ###
    0b00011010, //    ## #
    0b00110010, //   ##  #
    0b01111110, //  ######
    0b00000000, //
];

const BLACK_KNIGHT: Glyph = [
    0b00000000, //
    0b00011100, //    ###
    0b00111110, //   #####
    0b01111110, //  ######
    0b00011110, //    ####
    0b00111110, //   #####
    0b01111110, //  ######
    0b00000000, //
];

const WHITE_BISHOP: Glyph = [
    0b00000000, //
    0b00011000, //    ##
    0b00100100, //   #  #
    0b01000010, //  #    #
    0b00100100, //   #  #
    0b00011000, //    ##
    0b01111110, //  ######
    0b00000000, //
];

const BLACK_BISHOP: Glyph = [
    0b00000000, //
    0b00011000, //    ##
    0b00111100, //   ####
    0b01111110, //  ######
    0b00111100, //   ####
    0b00011000, //    ##
    0b01111110, //  ######
    0b00000000, //
];

const WHITE_ROOK: Glyph = [
    0b00000000, //
    0b01011010, //  # ## #
    0b01111110, //  ######
    0b00100100, //   #  #
    0b00100100, //   #  #
    0b00100100, //   #  #
    0b01111110, //  ######
    0b00000000, //
];

const BLACK_ROOK: Glyph = [
    0b00000000, //
    0b01011010, //  # ## #
    0b01111110, //  ######
    0b00111100, //   ####
    0b00111100, //   ####
    0b00111100, //   ####
    0b01111110, //  ######
    0b00000000, //
];

const WHITE_QUEEN: Glyph = [
    0b00000000, //
    0b01010101, //  # # # #
    0b01010101, //  # # # #
    0b00101010, //   # # #
    0b00100100, //   #  #
    0b00100100, //   #  #
    0b01111110, //  ######
    0b00000000, //
];

const BLACK_QUEEN: Glyph = [
    0b00000000, //
    0b01010101, //  # # # #
    0b01111111, //  #######
    0b00111110, //   #####
    0b00111100, //   ####
    0b00111100, //   ####
    0b01111110, //  ######
    0b00000000, //
];

const WHITE_KING: Glyph = [
    0b00011000, //    ##
    0b00111100, //   ####
    0b00011000, //    ##
    0b00100100, //   #  #
    0b01000010, //  #    #
    0b00100100, //   #  #
    0b01111110, //  ######
    0b00000000, //
];

const BLACK_KING: Glyph = [
    0b00011000, //    ##
    0b00111100, //   ####
    0b00011000, //    ##
    0b00111100, //   ####
    0b01111110, //  ######
    0b00111100, //   ####
    0b01111110, //  ######
    0b00000000, //
];

pub(crate) fn glyph(piece: Piece) -> &'static Glyph {
    match (piece.side, piece.kind) {
        (Side::White, PieceKind::Pawn) => &WHITE_PAWN,
        (Side::White, PieceKind::Knight) => &WHITE_KNIGHT,
        (Side::White, PieceKind::Bishop) => &WHITE_BISHOP,
        (Side::White, PieceKind::Rook) => &WHITE_ROOK,
        (Side::White, PieceKind::Queen) => &WHITE_QUEEN,
        (Side::White, PieceKind::King) => &WHITE_KING,
        (Side::Black, PieceKind::Pawn) => &BLACK_PAWN,
        (Side::Black, PieceKind::Knight) => &BLACK_KNIGHT,
        (Side::Black, PieceKind::Bishop) => &BLACK_BISHOP,
        (Side::Black, PieceKind::Rook) => &BLACK_ROOK,
        (Side::Black, PieceKind::Queen) => &BLACK_QUEEN,
        (Side::Black, PieceKind::King) => &BLACK_KING,
    }
}
