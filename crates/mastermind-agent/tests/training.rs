use std::{env, fs, process};

use mastermind_agent::{
    LearnerParams, MastermindEnv, QLearningAgent, WIN_REWARD,
    training::{self, Checkpoint, Trainer},
};
use mastermind_engine::{
    Code, CodeSpace, ConsistencyFilter, GameConfig, GameSession, Observation, Seed,
};
use rand::{Rng as _, seq::IndexedRandom as _};

fn seed(byte: u8) -> Seed {
    Seed::from_bytes([byte; 16])
}

fn make_env(config: GameConfig, params: LearnerParams) -> MastermindEnv {
    let agent = QLearningAgent::with_seed(config, params, seed(0x11));
    MastermindEnv::with_seed(agent, seed(0x22))
}

/// Win rate of a policy that guesses uniformly over the whole guess space.
fn uniform_random_win_rate(config: GameConfig, games: usize) -> f64 {
    let mut rng = seed(0x33).rng();
    let all_codes = CodeSpace::new(&config).collect::<Vec<_>>();
    let mut wins = 0_u32;
    for _ in 0..games {
        let mut session = GameSession::with_seed(config, rng.random());
        while !session.is_terminal() {
            let guess = all_codes.choose(&mut rng).unwrap().clone();
            session.play(guess).unwrap();
        }
        if session.state().is_solved() {
            wins += 1;
        }
    }
    f64::from(wins) / games as f64
}

/// Win rate of a policy that guesses uniformly over the legal actions.
fn uniform_legal_win_rate(config: GameConfig, games: usize) -> f64 {
    let mut rng = seed(0x44).rng();
    let filter = ConsistencyFilter::new(config);
    let mut wins = 0_u32;
    for _ in 0..games {
        let mut session = GameSession::with_seed(config, rng.random());
        while !session.is_terminal() {
            let actions = filter.legal_actions_for(&session.observation());
            session.play(actions.choose(&mut rng).unwrap().clone()).unwrap();
        }
        if session.state().is_solved() {
            wins += 1;
        }
    }
    f64::from(wins) / games as f64
}

#[test]
fn test_episodes_terminate_within_turn_budget() {
    let configs = [
        GameConfig::new(1, 1, 1).unwrap(),
        GameConfig::new(2, 2, 1).unwrap(),
        GameConfig::new(3, 2, 2).unwrap(),
        GameConfig::new(4, 3, 3).unwrap(),
        GameConfig::new(6, 1, 2).unwrap(),
    ];
    for config in configs {
        let mut env = make_env(config, LearnerParams::default());
        for _ in 0..100 {
            let mut observation = env.reset();
            let mut steps = 0;
            loop {
                let action = env
                    .agent_mut()
                    .act(&observation)
                    .expect("active episode must have a legal action");
                let step = env.step(action).unwrap();
                steps += 1;
                assert!(steps <= config.n_turns());

                let solved = step.feedback.is_solved(config.len_code());
                let exhausted = steps == config.n_turns();
                assert_eq!(step.terminated, solved || exhausted, "{config}, step {steps}");
                assert_eq!(step.reward == WIN_REWARD, solved);
                if step.terminated {
                    break;
                }
                observation = step.observation;
            }
        }
    }
}

#[test]
fn test_trainer_counts_games() {
    let config = GameConfig::new(3, 3, 2).unwrap();
    let mut env = make_env(config, LearnerParams::default());
    let mut seen = 0;
    let mut wins = 0;
    let history = Trainer::new(40)
        .train(&mut env, |outcome, running, trained| {
            seen += 1;
            wins += usize::from(outcome.won);
            assert_eq!(running.games(), seen);
            assert_eq!(running.wins(), wins);
            assert!(outcome.turns <= config.n_turns());
            assert!(!outcome.stuck);
            assert_eq!(outcome.won, trained.session().state().is_solved());
        })
        .unwrap();
    assert_eq!(history.games(), 40);
    assert_eq!(history.wins(), wins);
    assert!(!env.agent().q_table().is_empty());
}

#[test]
fn test_trainer_writes_checkpoint() {
    let config = GameConfig::new(2, 2, 2).unwrap();
    let mut env = make_env(config, LearnerParams::default());
    let path = env::temp_dir().join(format!(
        "mastermind-trainer-checkpoint-{}.json",
        process::id()
    ));
    let checkpoint = Checkpoint {
        path: path.clone(),
        every: 10,
    };
    Trainer::new(25)
        .with_checkpoint(checkpoint)
        .train(&mut env, |_, _, _| {})
        .unwrap();

    let loaded = QLearningAgent::load_for(&path, &config).unwrap();
    assert_eq!(
        loaded.q_table().entry_count(),
        env.agent().q_table().entry_count()
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_trained_agent_beats_uniform_random_guessing() {
    let config = GameConfig::new(2, 2, 1).unwrap();
    let params = LearnerParams {
        alpha: 0.5,
        epsilon: 0.3,
        discount: 0.99,
    };
    let mut env = make_env(config, params);
    Trainer::new(300).train(&mut env, |_, _, _| {}).unwrap();

    let mut agent = env.into_agent();
    assert!(agent.policy(&Observation::empty(&config)).is_some());
    let evaluation = training::evaluate(&mut agent, 500, seed(0x55), |_| {}).unwrap();
    let baseline = uniform_random_win_rate(config, 2000);

    assert_eq!(evaluation.win_rate(), 1.0);
    assert!(baseline < 0.85, "baseline {baseline}");
    assert!(evaluation.win_rate() > baseline);
}

#[test]
fn test_learns_to_open_with_distinct_colors() {
    // With 3 colors, 2 pegs and 2 turns, an opening with two distinct colors
    // splits the 9 codes into 5 feedback classes and wins 5/9 of the games;
    // a repeated-color opening only yields 3 classes (3/9).
    let config = GameConfig::new(3, 2, 2).unwrap();
    let params = LearnerParams {
        alpha: 0.01,
        epsilon: 1.0,
        discount: 0.99,
    };
    let mut env = make_env(config, params);
    Trainer::new(50_000).train(&mut env, |_, _, _| {}).unwrap();

    let mut agent = env.into_agent();
    let initial = Observation::empty(&config);
    for _ in 0..20 {
        let opening = agent.policy(&initial).unwrap();
        assert_ne!(opening.colors()[0], opening.colors()[1], "{opening}");
    }
    for pair in [1, 2, 3] {
        let repeated = agent.value(&initial, &Code::from(vec![pair, pair]));
        for distinct in [Code::from(vec![1, 2]), Code::from(vec![3, 1])] {
            assert!(agent.value(&initial, &distinct) > repeated, "{distinct}");
        }
    }

    let evaluation = training::evaluate(&mut agent, 4000, seed(0x66), |_| {}).unwrap();
    let baseline = uniform_legal_win_rate(config, 4000);
    assert!(
        evaluation.win_rate() > baseline,
        "greedy {} vs uniform legal {baseline}",
        evaluation.win_rate()
    );
}
