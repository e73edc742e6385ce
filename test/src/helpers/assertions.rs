/// Assert that exactly the given peers ended the session, each once
#[macro_export]
macro_rules! assert_ended_only_on {
    ($relay:expr, $outcome_id:expr, [$($peer:expr),*]) => {
        let expected: Vec<modnet_shared::PeerId> = vec![$($peer),*];
        for session in $relay.sessions() {
            let ended = &session.transport().ended;
            if expected.contains(&session.local_peer()) {
                assert_eq!(
                    ended,
                    &vec![$outcome_id],
                    "Peer {:?} should have ended the session exactly once",
                    session.local_peer()
                );
            } else {
                assert!(
                    ended.is_empty(),
                    "Peer {:?} is not host and must not end the session",
                    session.local_peer()
                );
            }
        }
    };
}

/// Assert that a peer shows the given game over outcome
#[macro_export]
macro_rules! assert_game_over_shown {
    ($session:expr, $outcome_id:expr) => {
        assert_eq!(
            $session.state().game_over().map(|game_over| game_over.outcome_id),
            Some($outcome_id),
            "Peer {:?} should show game over {}",
            $session.local_peer(),
            $outcome_id
        );
    };
}
