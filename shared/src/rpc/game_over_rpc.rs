use log::{debug, info, warn};
use modnet_serde::{ByteReader, ByteWrite, Serde};

use crate::{
    protocol::Protocol,
    registry::outcome::BuiltinOutcome,
    rpc::{
        custom_rpc::{CustomRpc, HandleContext, LocalHandling},
        data::GameOverData,
        envelope::RpcTag,
        error::RpcError,
    },
    session::state::ActiveGameOver,
    types::PeerId,
};

/// Ends the game with an extension outcome
///
/// Every peer checks the outcome's condition and shows the result. Only the
/// host then ends the session for everyone, and only once.
pub struct GameOverRpc;

impl CustomRpc for GameOverRpc {
    type Payload = GameOverData;

    fn tag(&self) -> RpcTag {
        RpcTag::GameOver
    }

    fn local_handling(&self) -> LocalHandling {
        LocalHandling::After
    }

    fn write(
        &self,
        _protocol: &Protocol,
        payload: &GameOverData,
        writer: &mut dyn ByteWrite,
    ) -> Result<(), RpcError> {
        payload.ser(writer);
        Ok(())
    }

    fn read(&self, protocol: &Protocol, reader: &mut ByteReader) -> Result<GameOverData, RpcError> {
        Ok(GameOverData::de_with_limit(
            reader,
            protocol.config().max_sequence_length,
        )?)
    }

    fn handle(&self, context: &mut HandleContext, origin: PeerId, payload: GameOverData) {
        let GameOverData {
            outcome_id,
            winners,
        } = payload;

        if let Some(builtin) = BuiltinOutcome::from_id(outcome_id) {
            debug!(
                "Ignoring game over with built-in outcome {:?} from {:?}",
                builtin, origin
            );
            return;
        }
        let outcomes = context.protocol.outcomes();
        if outcomes.resolve(outcome_id).is_none() {
            warn!(
                "Ignoring game over from {:?}: outcome id {} is not registered on this peer",
                origin, outcome_id
            );
            return;
        }
        let outcome = match outcomes.try_instantiate(outcome_id, Vec::new()) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("Ignoring game over from {:?}: {}", origin, error);
                return;
            }
        };

        if !outcome.verify_condition(origin, &winners) {
            info!(
                "Game over {} from {:?} rejected: condition not met for winners {:?}",
                outcome.name(),
                origin,
                winners
            );
            return;
        }

        info!("Game over: {} won by {:?}", outcome.name(), winners);
        context.state.set_game_over(ActiveGameOver {
            outcome_id,
            outcome,
            winners,
            origin,
        });

        if !context.state.is_host() {
            return;
        }
        if context.state.authority_mut().claim_session_end() {
            info!("Host ending session with outcome {}", outcome_id);
            context.transport.end_session(outcome_id);
        } else {
            debug!("Session already ended, outcome {} not re-broadcast", outcome_id);
        }
    }
}
