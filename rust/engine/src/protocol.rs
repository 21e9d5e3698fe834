//! Line-oriented wire protocol between the engine and remote players.
//!
//! Every engine message is a command line, acknowledged by the player with a
//! fixed reply, optionally followed by one payload line. Payloads are plain
//! integers or single-line JSON documents. Move requests are answered with a
//! JSON reply line carrying the chosen move and the player's own view of its
//! state.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::mpsc::{channel, Receiver, Sender};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::Card;
use crate::channel::{DecisionContext, DecisionProvider, EndSummary, Notice, PlayerChannel};
use crate::errors::ChannelError;
use crate::player::{Decision, MoveResult, Player};

/// Engine-to-player commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    InitialPoints,
    GameStartReset,
    SmallBlind,
    BigBlind,
    InitialHand,
    /// Carries the round number, 0 = pre-flop .. 3 = river
    RequestMove(u8),
    RoundEndUpdate,
    GameEndHandUpdate,
    GameEndBetUpdate,
    GameEndReturnUpdate,
    GameEndPointsUpdate,
}

impl Command {
    pub fn wire(&self) -> String {
        match self {
            Command::InitialPoints => "sending_initial_points".into(),
            Command::GameStartReset => "game_start_reset".into(),
            Command::SmallBlind => "sending_small_blind".into(),
            Command::BigBlind => "sending_big_blind".into(),
            Command::InitialHand => "sending_initial_hand".into(),
            Command::RequestMove(round) => format!("request_round_{round}_move"),
            Command::RoundEndUpdate => "round_end_update".into(),
            Command::GameEndHandUpdate => "game_end_hand_update".into(),
            Command::GameEndBetUpdate => "game_end_bet_update".into(),
            Command::GameEndReturnUpdate => "game_end_return_update".into(),
            Command::GameEndPointsUpdate => "game_end_points_update".into(),
        }
    }

    /// Fixed reply a player sends before anything else.
    pub fn ack(&self) -> &'static str {
        match self {
            Command::InitialPoints => "acknowledged_initial_points",
            Command::GameStartReset => "acknowledged_game_start_reset",
            Command::SmallBlind => "acknowledged_small_blind",
            Command::BigBlind => "acknowledged_big_blind",
            Command::InitialHand => "acknowledged_initial_hand",
            Command::RequestMove(_) => "acknowledged_request",
            Command::RoundEndUpdate => "acknowledged_round_end_update",
            Command::GameEndHandUpdate => "acknowledged_game_end_hand_update",
            Command::GameEndBetUpdate => "acknowledged_game_end_bet_update",
            Command::GameEndReturnUpdate => "acknowledged_game_end_return_update",
            Command::GameEndPointsUpdate => "acknowledged_game_end_points_update",
        }
    }

    pub fn parse(line: &str) -> Option<Command> {
        let cmd = match line.trim() {
            "sending_initial_points" => Command::InitialPoints,
            "game_start_reset" => Command::GameStartReset,
            "sending_small_blind" => Command::SmallBlind,
            "sending_big_blind" => Command::BigBlind,
            "sending_initial_hand" => Command::InitialHand,
            "round_end_update" => Command::RoundEndUpdate,
            "game_end_hand_update" => Command::GameEndHandUpdate,
            "game_end_bet_update" => Command::GameEndBetUpdate,
            "game_end_return_update" => Command::GameEndReturnUpdate,
            "game_end_points_update" => Command::GameEndPointsUpdate,
            other => {
                let round = other
                    .strip_prefix("request_round_")?
                    .strip_suffix("_move")?
                    .parse::<u8>()
                    .ok()?;
                if round > 3 {
                    return None;
                }
                Command::RequestMove(round)
            }
        };
        Some(cmd)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialHandPayload {
    pub first_card: Card,
    pub second_card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(rename = "HAND")]
    pub hand: Vec<Card>,
    #[serde(rename = "BOARD")]
    pub board: Vec<Card>,
    #[serde(rename = "CURRENT_BET")]
    pub current_bet: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReply {
    #[serde(rename = "MOVE")]
    pub action: String,
    #[serde(rename = "RAISE_AMOUNT", default, skip_serializing_if = "Option::is_none")]
    pub raise_amount: Option<u32>,
    #[serde(rename = "POINTS")]
    pub points: u32,
    #[serde(rename = "PAST_COMMITTED")]
    pub past_committed: u32,
    #[serde(rename = "CURRENT_COMMITTED")]
    pub current_committed: u32,
    #[serde(rename = "IN_GAME")]
    pub in_game: bool,
    #[serde(rename = "BET_MATCH")]
    pub bet_match: bool,
}

impl MoveReply {
    pub fn from_result(result: &MoveResult) -> Self {
        let decision = result.decision();
        let s = result.snapshot();
        Self {
            action: decision.move_name().to_string(),
            raise_amount: match decision {
                Decision::Raise(amount) => Some(amount),
                _ => None,
            },
            points: s.points,
            past_committed: s.past_committed,
            current_committed: s.current_committed,
            in_game: s.in_game,
            bet_match: s.bet_match,
        }
    }

    pub fn decision(&self) -> Result<Decision, ChannelError> {
        Decision::from_move_name(&self.action, self.raise_amount).ok_or_else(|| {
            ChannelError::MalformedReply(format!(
                "unknown move `{}` (raise amount {:?})",
                self.action, self.raise_amount
            ))
        })
    }
}

/// Sends and receives whole lines.
pub trait Transport {
    fn send_line(&mut self, line: &str) -> Result<(), ChannelError>;
    fn recv_line(&mut self) -> Result<String, ChannelError>;
}

/// Transport over any buffered reader / writer pair, e.g. a TCP stream or
/// a child process's stdio.
#[derive(Debug)]
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Transport for LineTransport<R, W> {
    fn send_line(&mut self, line: &str) -> Result<(), ChannelError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn recv_line(&mut self) -> Result<String, ChannelError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ChannelError::Disconnected);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// In-process transport; `pair` returns the two connected ends.
#[derive(Debug)]
pub struct MemoryTransport {
    tx: Sender<String>,
    rx: Receiver<String>,
}

impl MemoryTransport {
    pub fn pair() -> (MemoryTransport, MemoryTransport) {
        let (a_tx, b_rx) = channel();
        let (b_tx, a_rx) = channel();
        (
            MemoryTransport { tx: a_tx, rx: a_rx },
            MemoryTransport { tx: b_tx, rx: b_rx },
        )
    }
}

impl Transport for MemoryTransport {
    fn send_line(&mut self, line: &str) -> Result<(), ChannelError> {
        self.tx
            .send(line.to_string())
            .map_err(|_| ChannelError::Disconnected)
    }

    fn recv_line(&mut self) -> Result<String, ChannelError> {
        self.rx.recv().map_err(|_| ChannelError::Disconnected)
    }
}

fn to_line<T: Serialize>(value: &T) -> Result<String, ChannelError> {
    serde_json::to_string(value).map_err(|e| ChannelError::MalformedReply(e.to_string()))
}

fn from_line<T: DeserializeOwned>(line: &str) -> Result<T, ChannelError> {
    serde_json::from_str(line)
        .map_err(|e| ChannelError::MalformedReply(format!("{e}: `{line}`")))
}

/// Engine-side end of a remote player.
#[derive(Debug)]
pub struct RemoteSeat<T> {
    transport: T,
}

impl<T: Transport> RemoteSeat<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Sends a command, checks its acknowledgement, then sends the payload.
    fn exchange(&mut self, command: Command, payload: Option<String>) -> Result<(), ChannelError> {
        self.transport.send_line(&command.wire())?;
        let ack = self.transport.recv_line()?;
        if ack != command.ack() {
            return Err(ChannelError::ProtocolViolation {
                expected: command.ack().to_string(),
                received: ack,
            });
        }
        if let Some(payload) = payload {
            self.transport.send_line(&payload)?;
        }
        Ok(())
    }
}

impl<T: Transport> PlayerChannel for RemoteSeat<T> {
    fn notify(&mut self, notice: &Notice) -> Result<(), ChannelError> {
        let (command, payload) = match notice {
            Notice::InitialPoints(p) => (Command::InitialPoints, Some(p.to_string())),
            Notice::GameStartReset => (Command::GameStartReset, None),
            Notice::SmallBlind(a) => (Command::SmallBlind, Some(a.to_string())),
            Notice::BigBlind(a) => (Command::BigBlind, Some(a.to_string())),
            Notice::InitialHand {
                first_card,
                second_card,
            } => (
                Command::InitialHand,
                Some(to_line(&InitialHandPayload {
                    first_card: *first_card,
                    second_card: *second_card,
                })?),
            ),
            Notice::RoundEnd => (Command::RoundEndUpdate, None),
            Notice::GameEndHands(h) => (Command::GameEndHandUpdate, Some(to_line(h)?)),
            Notice::GameEndBets(b) => (Command::GameEndBetUpdate, Some(to_line(b)?)),
            Notice::GameEndReturns(r) => (Command::GameEndReturnUpdate, Some(to_line(r)?)),
            Notice::GameEndSummary(s) => (Command::GameEndPointsUpdate, Some(to_line(s)?)),
        };
        self.exchange(command, payload)
    }

    fn request_move(&mut self, ctx: &DecisionContext) -> Result<Decision, ChannelError> {
        let request = MoveRequest {
            hand: ctx.hand.clone(),
            board: ctx.board.clone(),
            current_bet: ctx.current_bet,
        };
        self.exchange(Command::RequestMove(ctx.round), Some(to_line(&request)?))?;
        let line = self.transport.recv_line()?;
        let reply: MoveReply = from_line(&line)?;
        debug!(player = %ctx.player, reply = %line, "move reply");
        reply.decision()
    }
}

/// What a client learned at the end of a hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Showdown {
    pub hands: BTreeMap<String, Vec<Card>>,
    pub bets: BTreeMap<String, u32>,
    pub returns: BTreeMap<String, u32>,
    pub summary: Option<EndSummary>,
}

/// Player-side end of the protocol: answers the engine's commands, keeps a
/// local copy of its own state and asks a [`DecisionProvider`] for moves.
pub struct ClientSession<T, D> {
    transport: T,
    provider: D,
    player: Player,
    board: Vec<Card>,
    showdown: Showdown,
    /// Last big blind seen; blinds are only sent to the seats posting them
    big_blind: u32,
    max_attempts: u32,
}

impl<T: Transport, D: DecisionProvider> ClientSession<T, D> {
    pub fn new(transport: T, provider: D) -> Self {
        let player = Player::new(provider.name().to_string(), 0);
        Self {
            transport,
            provider,
            player,
            board: Vec::with_capacity(5),
            showdown: Showdown::default(),
            big_blind: 0,
            max_attempts: 3,
        }
    }

    /// How many locally illegal decisions to tolerate before folding.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn showdown(&self) -> &Showdown {
        &self.showdown
    }

    fn payload<P: DeserializeOwned>(&mut self) -> Result<P, ChannelError> {
        let line = self.transport.recv_line()?;
        from_line(&line)
    }

    /// Handles one command. Returns the command that was processed.
    pub fn step(&mut self) -> Result<Command, ChannelError> {
        let line = self.transport.recv_line()?;
        let command = Command::parse(&line).ok_or_else(|| ChannelError::ProtocolViolation {
            expected: "an engine command".to_string(),
            received: line.clone(),
        })?;
        self.transport.send_line(command.ack())?;

        match command {
            Command::InitialPoints => {
                let points: u32 = self.payload()?;
                self.player.set_points(points);
            }
            Command::GameStartReset => {
                self.player.reset_for_hand();
                self.board.clear();
                self.showdown = Showdown::default();
            }
            Command::SmallBlind => {
                let amount: u32 = self.payload()?;
                self.player.post_blind(amount);
            }
            Command::BigBlind => {
                let amount: u32 = self.payload()?;
                self.player.post_blind(amount);
                self.big_blind = self.big_blind.max(amount);
            }
            Command::InitialHand => {
                let dealt: InitialHandPayload = self.payload()?;
                for card in [dealt.first_card, dealt.second_card] {
                    self.player
                        .dealt_card(card)
                        .map_err(|e| ChannelError::MalformedReply(e.to_string()))?;
                }
            }
            Command::RequestMove(round) => {
                let request: MoveRequest = self.payload()?;
                self.board = request.board;
                let result = self.choose(round, request.current_bet);
                self.transport.send_line(&to_line(&MoveReply::from_result(&result))?)?;
            }
            Command::RoundEndUpdate => self.player.settle_round(),
            Command::GameEndHandUpdate => self.showdown.hands = self.payload()?,
            Command::GameEndBetUpdate => self.showdown.bets = self.payload()?,
            Command::GameEndReturnUpdate => self.showdown.returns = self.payload()?,
            Command::GameEndPointsUpdate => {
                let summary: EndSummary = self.payload()?;
                self.player.close_hand(summary.end_return);
                self.showdown.summary = Some(summary);
            }
        }
        Ok(command)
    }

    /// Smallest pot consistent with what this client has seen: its own
    /// commitments plus the bet of whoever it is facing.
    fn visible_pot(&self, current_bet: u32) -> u32 {
        let own = self.player.total_committed();
        if current_bet > self.player.current_committed() {
            own + current_bet
        } else {
            own
        }
    }

    fn choose(&mut self, round: u8, current_bet: u32) -> MoveResult {
        // a new request means the bet changed since this player last acted
        self.player.set_requirement_met(false);
        if round == 0 && self.big_blind == 0 {
            // the pre-flop requirement starts at the big blind
            self.big_blind = current_bet;
        }
        let ctx = DecisionContext {
            round,
            player: self.player.name().to_string(),
            hand: self.player.hand().to_vec(),
            board: self.board.clone(),
            current_bet,
            points: self.player.points(),
            current_committed: self.player.current_committed(),
            past_committed: self.player.past_committed(),
            pot: self.visible_pot(current_bet),
            big_blind: self.big_blind,
        };
        for _ in 0..self.max_attempts {
            let decision = self.provider.decide(&ctx);
            match self.player.apply(decision, current_bet) {
                Ok(result) => return result,
                Err(reason) => {
                    warn!(player = self.player.name(), ?decision, %reason, "decision refused locally");
                    self.provider.rejected(&reason);
                }
            }
        }
        self.player.fold()
    }

    /// Processes commands until the end-of-hand summary arrives.
    pub fn play_hand(&mut self) -> Result<EndSummary, ChannelError> {
        loop {
            if self.step()? == Command::GameEndPointsUpdate {
                if let Some(summary) = &self.showdown.summary {
                    return Ok(summary.clone());
                }
            }
        }
    }

    /// Processes commands until the engine goes away.
    pub fn run(&mut self) -> Result<(), ChannelError> {
        loop {
            match self.step() {
                Ok(_) => {}
                Err(ChannelError::Disconnected) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }

    pub fn into_provider(self) -> D {
        self.provider
    }
}
