#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use gridsmith_core::config::LobbyConfig;
    use gridsmith_core::enums::{GamePhase, Role};
    use gridsmith_core::error::LobbyError;
    use gridsmith_core::types::ParticipantId;

    use crate::fsm::Lobby;

    fn lobby_with(players: u32, config: LobbyConfig) -> Lobby {
        let mut lobby = Lobby::new(config);
        for i in 0..players {
            lobby.join(ParticipantId(i)).unwrap();
        }
        lobby
    }

    #[test]
    fn test_join_and_waiting_status() {
        let lobby = lobby_with(3, LobbyConfig::default());
        assert_eq!(lobby.players().len(), 3);
        assert_eq!(lobby.phase(), GamePhase::Waiting);
        assert_eq!(lobby.owner(), Some(ParticipantId(2)), "last joiner owns the lobby");

        let view = lobby.view(|_| None);
        assert_eq!(view.status, "Waiting... (3 Joined)");
        assert!(view.lobby_ui_visible);
        assert!(view.current_parent.is_none());
    }

    #[test]
    fn test_join_rejections() {
        let mut lobby = lobby_with(
            2,
            LobbyConfig {
                max_players: 2,
                ..Default::default()
            },
        );
        assert_eq!(
            lobby.join(ParticipantId(0)),
            Err(LobbyError::AlreadyJoined(ParticipantId(0)))
        );
        assert_eq!(lobby.join(ParticipantId(9)), Err(LobbyError::Full(2)));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        lobby.start(ParticipantId(1), &mut rng).unwrap();
        assert_eq!(lobby.join(ParticipantId(5)), Err(LobbyError::AlreadyStarted));
    }

    #[test]
    fn test_only_owner_can_start() {
        let mut lobby = lobby_with(3, LobbyConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            lobby.start(ParticipantId(0), &mut rng),
            Err(LobbyError::NotOwner(ParticipantId(0)))
        );
        assert_eq!(lobby.phase(), GamePhase::Waiting);
        lobby.start(ParticipantId(2), &mut rng).unwrap();
        assert_eq!(lobby.phase(), GamePhase::InRound);
    }

    #[test]
    fn test_start_requires_min_players() {
        let mut lobby = lobby_with(
            1,
            LobbyConfig {
                min_players: 2,
                ..Default::default()
            },
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            lobby.start(ParticipantId(0), &mut rng),
            Err(LobbyError::NotEnoughPlayers {
                joined: 1,
                required: 2
            })
        );
    }

    #[test]
    fn test_role_draw_counts_distinct_werewolves() {
        for seed in 0..20 {
            let mut lobby = lobby_with(
                6,
                LobbyConfig {
                    werewolf_count: 2,
                    ..Default::default()
                },
            );
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            lobby.start(ParticipantId(5), &mut rng).unwrap();

            let wolves = (0..6)
                .filter(|&i| lobby.role_of(ParticipantId(i)) == Some(Role::Werewolf))
                .count();
            assert_eq!(wolves, 2, "seed {seed}");
        }
    }

    #[test]
    fn test_werewolf_count_clamped_to_players() {
        let mut lobby = lobby_with(
            2,
            LobbyConfig {
                werewolf_count: 5,
                ..Default::default()
            },
        );
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        lobby.start(ParticipantId(1), &mut rng).unwrap();
        assert_eq!(lobby.role_of(ParticipantId(0)), Some(Role::Werewolf));
        assert_eq!(lobby.role_of(ParticipantId(1)), Some(Role::Werewolf));
    }

    #[test]
    fn test_gate_enables_only_parent() {
        let mut lobby = lobby_with(4, LobbyConfig::default());
        for i in 0..4 {
            assert!(!lobby.inventory_enabled(ParticipantId(i)), "no one before start");
        }

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        lobby.start(ParticipantId(3), &mut rng).unwrap();
        let parent = lobby.current_parent().unwrap();
        assert!(lobby.is_joined(parent));

        let enabled: Vec<_> = (0..4)
            .map(ParticipantId)
            .filter(|&p| lobby.inventory_enabled(p))
            .collect();
        assert_eq!(enabled, vec![parent]);
    }

    #[test]
    fn test_in_round_status_names_parent() {
        let mut lobby = lobby_with(1, LobbyConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        lobby.start(ParticipantId(0), &mut rng).unwrap();

        let view = lobby.view(|p| (p == ParticipantId(0)).then(|| "Alice".to_string()));
        assert_eq!(view.status, "Current Parent: Alice");
        assert!(!view.lobby_ui_visible);

        let view = lobby.view(|_| None);
        assert_eq!(view.status, "Current Parent: Unknown");
    }

    #[test]
    fn test_same_seed_same_draw() {
        let draw = |seed| {
            let mut lobby = lobby_with(8, LobbyConfig::default());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            lobby.start(ParticipantId(7), &mut rng).unwrap();
            let roles: Vec<_> = (0..8).map(|i| lobby.role_of(ParticipantId(i))).collect();
            (lobby.current_parent(), roles)
        };
        assert_eq!(draw(99), draw(99));
    }

    #[test]
    fn test_leave_hands_ownership_back() {
        let mut lobby = lobby_with(3, LobbyConfig::default());
        lobby.leave(ParticipantId(2));
        assert_eq!(lobby.owner(), Some(ParticipantId(1)));
        assert_eq!(lobby.players(), &[ParticipantId(0), ParticipantId(1)]);
        assert!(lobby.role_of(ParticipantId(0)).is_none(), "roles hidden before start");
    }
}
