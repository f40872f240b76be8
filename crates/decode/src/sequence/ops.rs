use std::fmt::{self, Display};

use alloy::primitives::{Address, U256};
use dex2_common::utils::strings::encode_hex_reduced;
use serde::Serialize;
use tracing::trace;

use super::{bits::BitFieldReader, trace::TraceRenderer};
use crate::error::SequenceError;

/// Every opcode carries this byte in its high half.
pub const OPCODE_MAGIC: u8 = 0xDE;

/// Words following the operand word of a new order: the order fields, then `s`, then `t`.
const NEW_ORDER_EXTRA_WORDS: usize = 3;

/// The 16-bit operation tags of an `exeSequence` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Opcode {
    /// Credit a deposit observed on chain
    ConfirmDeposit = 0xDE01,
    /// Start a withdrawal for a trader
    InitiateWithdraw = 0xDE02,
    /// Match a maker order against a taker order
    MatchOrders = 0xDE03,
    /// Cancel an order without its trader's signature
    HardCancelOrder = 0xDE04,
    /// Update maker/taker fee rates
    SetFeeRates = 0xDE05,
    /// Update the fee rebate percentage
    SetFeeRebatePercent = 0xDE06,
}

impl TryFrom<u16> for Opcode {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0xDE01 => Ok(Opcode::ConfirmDeposit),
            0xDE02 => Ok(Opcode::InitiateWithdraw),
            0xDE03 => Ok(Opcode::MatchOrders),
            0xDE04 => Ok(Opcode::HardCancelOrder),
            0xDE05 => Ok(Opcode::SetFeeRates),
            0xDE06 => Ok(Opcode::SetFeeRebatePercent),
            other => Err(other),
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::ConfirmDeposit => "ConfirmDeposit",
            Opcode::InitiateWithdraw => "InitiateWithdraw",
            Opcode::MatchOrders => "MatchOrders",
            Opcode::HardCancelOrder => "HardCancelOrder",
            Opcode::SetFeeRates => "SetFeeRates",
            Opcode::SetFeeRebatePercent => "SetFeeRebatePercent",
        };
        f.write_str(name)
    }
}

/// One side of a MatchOrders operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The resting order
    Maker,
    /// The incoming order
    Taker,
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Maker => f.write_str("maker"),
            Side::Taker => f.write_str("taker"),
        }
    }
}

/// A `(trader, nonce)` pair identifying an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderKey {
    /// The trader who placed the order
    pub trader: Address,
    /// The trader's order nonce
    pub nonce: u64,
}

/// A signed order introduced by a MatchOrders operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// The order key
    pub key: OrderKey,
    /// The discriminator, doubling as the signature recovery id (27 or 28)
    pub v: u8,
    /// The trading pair
    pub pair_id: u32,
    /// Buy or sell
    pub action: u8,
    /// Immediate-or-cancel flag
    pub ioc: u8,
    /// Limit price, scaled by 1e8
    pub price_e8: u64,
    /// Amount, scaled by 1e8
    pub amount_e8: u64,
    /// Expiry, unix seconds
    pub expire_time_sec: u64,
    /// First signature word
    pub s: U256,
    /// Second signature word
    pub t: U256,
}

/// An order operand: either a reference to a known order or a new signed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OrderOperand {
    /// `v == 0`
    ExistingOrderRef(OrderKey),
    /// `v` is 27 or 28
    NewOrder(NewOrder),
}

impl OrderOperand {
    /// Words this operand occupies after its own operand word.
    pub fn extra_words(&self) -> usize {
        match self {
            OrderOperand::ExistingOrderRef(_) => 0,
            OrderOperand::NewOrder(_) => NEW_ORDER_EXTRA_WORDS,
        }
    }
}

/// A fully decoded operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all_fields = "camelCase")]
pub enum Operation {
    /// `0xDE01`
    ConfirmDeposit {
        /// The 240-bit deposit index
        deposit_index: U256,
    },
    /// `0xDE02`
    InitiateWithdraw {
        /// The withdrawing trader
        trader_addr: Address,
        /// The token being withdrawn
        token_code: u16,
        /// Amount, scaled by 1e8
        amount_e8: u64,
    },
    /// `0xDE03`
    MatchOrders {
        /// The resting order
        maker: OrderOperand,
        /// The incoming order
        taker: OrderOperand,
    },
    /// `0xDE04`, layout not decoded
    HardCancelOrder,
    /// `0xDE05`, layout not decoded
    SetFeeRates,
    /// `0xDE06`, layout not decoded
    SetFeeRebatePercent,
}

impl Operation {
    /// The opcode this operation was decoded from.
    pub fn opcode(&self) -> Opcode {
        match self {
            Operation::ConfirmDeposit { .. } => Opcode::ConfirmDeposit,
            Operation::InitiateWithdraw { .. } => Opcode::InitiateWithdraw,
            Operation::MatchOrders { .. } => Opcode::MatchOrders,
            Operation::HardCancelOrder => Opcode::HardCancelOrder,
            Operation::SetFeeRates => Opcode::SetFeeRates,
            Operation::SetFeeRebatePercent => Opcode::SetFeeRebatePercent,
        }
    }

    /// Body words consumed, including the opcode word.
    pub fn word_count(&self) -> usize {
        match self {
            Operation::MatchOrders { maker, taker } => 2 + maker.extra_words() + taker.extra_words(),
            _ => 1,
        }
    }
}

/// `<depositIndex>(240) <opcode>(16)`. The index is taken as-is; there is nothing left to check.
pub(crate) fn decode_confirm_deposit(
    reader: &mut BitFieldReader,
    out: &mut TraceRenderer,
) -> Operation {
    let deposit_index = reader.remainder();
    out.line("operation ConfirmDeposit:");
    out.line(format!("  depositIndex:  {deposit_index}"));
    Operation::ConfirmDeposit { deposit_index }
}

/// `<amountE8>(64) <tokenCode>(16) <traderAddr>(160) <opcode>(16)`
pub(crate) fn decode_initiate_withdraw(
    reader: &mut BitFieldReader,
    out: &mut TraceRenderer,
) -> Operation {
    out.line("operation InitiateWithdraw:");
    let trader_addr = reader.pop_u160();
    out.line(format!("  traderAddr: {}", render_address(trader_addr)));
    let token_code = reader.pop_u16();
    out.line(format!("  tokenCode: {token_code}"));
    let amount_e8 = reader.pop_u64();
    out.line(format!("  amountE8: {amount_e8}"));
    Operation::InitiateWithdraw { trader_addr, token_code, amount_e8 }
}

/// MatchOrders spans the opcode word, the taker operand word, and three more words for each
/// side that introduces a new order:
///
/// ```text
/// word[0]  <maker nonce>(64) <maker trader>(160) <v1>(8) <opcode>(16)
/// [word    <maker order fields>, word <s>, word <t>]     if v1 is 27 or 28
/// word     <taker nonce>(64) <taker trader>(160) <v2>(8)
/// [word    <taker order fields>, word <s>, word <t>]     if v2 is 27 or 28
/// ```
///
/// `rest` holds the body words after the opcode word. Returns the operation and the number of
/// words consumed including the opcode word.
pub(crate) fn decode_match_orders(
    reader: &mut BitFieldReader,
    rest: &[U256],
    out: &mut TraceRenderer,
) -> Result<(Operation, usize), SequenceError> {
    out.line("operation MatchOrders:");

    let maker = decode_order_operand(Side::Maker, reader, rest, out)?;
    let rest = &rest[maker.extra_words()..];

    let (taker_word, rest) = rest.split_first().ok_or(SequenceError::InsufficientInputs {
        side: Side::Taker,
        needed: 1,
        available: 0,
    })?;
    let taker = decode_order_operand(Side::Taker, &mut BitFieldReader::new(*taker_word), rest, out)?;

    let operation = Operation::MatchOrders { maker, taker };
    let consumed = operation.word_count();
    Ok((operation, consumed))
}

/// Decode one operand whose discriminator sits in the low byte of `reader`. Any nonzero
/// discriminator renders the new-order header before it is validated. For a new order, `rest`
/// must start with the order's three trailing words; this is checked before any of them is read.
fn decode_order_operand(
    side: Side,
    reader: &mut BitFieldReader,
    rest: &[U256],
    out: &mut TraceRenderer,
) -> Result<OrderOperand, SequenceError> {
    let v = reader.pop_u8();
    trace!("{} operand discriminator v={}", side, v);

    match v {
        0 => {
            out.line(format!("  {side}Order (existing):"));
            let key = decode_order_key(reader, out)?;
            Ok(OrderOperand::ExistingOrderRef(key))
        }
        v => {
            out.line(format!("  {side}Order (new, v={v}):"));
            if v != 27 && v != 28 {
                return Err(SequenceError::InvalidDiscriminator { side, v });
            }
            let [order_word, s, t] = match rest {
                [order_word, s, t, ..] => [*order_word, *s, *t],
                _ => {
                    return Err(SequenceError::InsufficientInputs {
                        side,
                        needed: NEW_ORDER_EXTRA_WORDS,
                        available: rest.len(),
                    })
                }
            };
            let key = decode_order_key(reader, out)?;
            decode_new_order(side, key, v, order_word, s, t, out).map(OrderOperand::NewOrder)
        }
    }
}

/// Addresses in the trace are minimal lowercase hex, like the other packed words.
fn render_address(address: Address) -> String {
    encode_hex_reduced(U256::from_be_slice(address.as_slice()))
}

/// `<nonce>(64) <trader>(160)` filling the rest of the operand word.
fn decode_order_key(
    reader: &mut BitFieldReader,
    out: &mut TraceRenderer,
) -> Result<OrderKey, SequenceError> {
    let trader = reader.pop_u160();
    out.line(format!("    trader: {}", render_address(trader)));
    let nonce = reader.pop_u64();
    out.line(format!("    nonce: {nonce}"));
    if !reader.remainder_is_zero() {
        return Err(SequenceError::ExtraBitsInField {
            field: "orderKey",
            remainder: reader.remainder(),
        });
    }
    Ok(OrderKey { trader, nonce })
}

/// `<expireTimeSec>(64) <amountE8>(64) <priceE8>(64) <ioc>(8) <action>(8) <pairId>(32)`, then
/// the two raw signature words.
fn decode_new_order(
    side: Side,
    key: OrderKey,
    v: u8,
    order_word: U256,
    s: U256,
    t: U256,
    out: &mut TraceRenderer,
) -> Result<NewOrder, SequenceError> {
    let mut reader = BitFieldReader::new(order_word);
    let pair_id = reader.pop_u32();
    out.line(format!("    pairId  : {pair_id}"));
    let action = reader.pop_u8();
    out.line(format!("    action  : {action}"));
    let ioc = reader.pop_u8();
    out.line(format!("    ioc     : {ioc}"));
    let price_e8 = reader.pop_u64();
    out.line(format!("    priceE8 : {price_e8}"));
    let amount_e8 = reader.pop_u64();
    out.line(format!("    amountE8: {amount_e8}"));
    let expire_time_sec = reader.pop_u64();
    out.line(format!("    expire  : {expire_time_sec}"));
    if !reader.remainder_is_zero() {
        return Err(SequenceError::ExtraBitsInField {
            field: "order",
            remainder: reader.remainder(),
        });
    }

    if s.is_zero() {
        return Err(SequenceError::ZeroSignatureComponent { side, component: "s" });
    }
    out.line(format!("    s       : {}", encode_hex_reduced(s)));
    if t.is_zero() {
        return Err(SequenceError::ZeroSignatureComponent { side, component: "t" });
    }
    out.line(format!("    t       : {}", encode_hex_reduced(t)));

    Ok(NewOrder { key, v, pair_id, action, ioc, price_e8, amount_e8, expire_time_sec, s, t })
}

/// HardCancelOrder, SetFeeRates and SetFeeRebatePercent: only the opcode is known, the word is
/// not inspected further.
pub(crate) fn decode_unimplemented(operation: Operation, out: &mut TraceRenderer) -> Operation {
    out.line(format!("operation {}:", operation.opcode()));
    out.line("  <not yet implemented>");
    operation
}
