use mars_rover_core::{Command, CommandOutcome, CommandToken, Heading, Position, Status};
use mars_rover_system_controller::{InitError, Rover};
use mars_rover_world::World;

fn rover_at_centre() -> Rover {
    Rover::new(World::mars(), Position::new(2, 2), Heading::North).expect("centre is plain")
}

fn outcome(status: Status, x: u32, y: u32, heading: Heading) -> CommandOutcome {
    CommandOutcome {
        status,
        position: Position::new(x, y),
        heading,
    }
}

#[test]
fn construction_sets_starting_pose() {
    let rover = rover_at_centre();

    assert_eq!(rover.position(), Position::new(2, 2));
    assert_eq!(rover.heading(), Heading::North);
    assert!(rover.commands().is_empty());
}

#[test]
fn forward_while_facing_north_moves_up_one_row() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["F"]),
        outcome(Status::Ok, 2, 1, Heading::North)
    );
}

#[test]
fn backward_while_facing_north_moves_down_one_row() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["B"]),
        outcome(Status::Ok, 2, 3, Heading::North)
    );
}

#[test]
fn left_turn_faces_west_in_place() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["L"]),
        outcome(Status::Ok, 2, 2, Heading::West)
    );
}

#[test]
fn right_turn_faces_east_in_place() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["R"]),
        outcome(Status::Ok, 2, 2, Heading::East)
    );
}

#[test]
fn mountain_blocks_move_and_reports_obstacle() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["L", "F"]),
        outcome(Status::Obstacle, 2, 2, Heading::West)
    );
}

#[test]
fn crevasse_blocks_move_and_reports_obstacle() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["F", "F", "R", "F"]),
        outcome(Status::Obstacle, 2, 0, Heading::East)
    );
}

#[test]
fn world_edge_blocks_move_and_reports_obstacle() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["F", "F", "F"]),
        outcome(Status::Obstacle, 2, 0, Heading::North)
    );
}

#[test]
fn lone_unknown_symbol_reports_invalid_command() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["X"]),
        outcome(Status::InvalidCommand, 2, 2, Heading::North)
    );
}

#[test]
fn unknown_symbol_does_not_stop_valid_commands() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["B", "X", "R", "F"]),
        outcome(Status::InvalidCommand, 3, 3, Heading::East)
    );
    assert_eq!(
        rover.command(["q", "B"]),
        outcome(Status::InvalidCommand, 2, 3, Heading::East)
    );
}

#[test]
fn obstacle_overrides_invalid_verdict() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["X", "L", "F"]),
        outcome(Status::Obstacle, 2, 2, Heading::West)
    );
    assert_eq!(
        rover.command(["F", "?"]),
        outcome(Status::Obstacle, 2, 2, Heading::West)
    );
}

#[test]
fn moves_after_a_blocked_move_still_apply() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["F", "F", "F", "R", "R", "F", "F"]),
        outcome(Status::Obstacle, 2, 2, Heading::South)
    );
}

#[test]
fn status_resets_between_batches() {
    let mut rover = rover_at_centre();

    assert_eq!(rover.command(["L", "F"]).status, Status::Obstacle);
    assert_eq!(
        rover.command(["R", "F"]),
        outcome(Status::Ok, 2, 1, Heading::North)
    );
}

#[test]
fn single_moves_follow_heading_unit_vectors() {
    let world = World::from_rows(["PPP", "PPP", "PPP"]).expect("layout parses");
    let cases = [
        (Heading::North, "F", Position::new(1, 0)),
        (Heading::North, "B", Position::new(1, 2)),
        (Heading::East, "F", Position::new(2, 1)),
        (Heading::East, "B", Position::new(0, 1)),
        (Heading::South, "F", Position::new(1, 2)),
        (Heading::South, "B", Position::new(1, 0)),
        (Heading::West, "F", Position::new(0, 1)),
        (Heading::West, "B", Position::new(2, 1)),
    ];

    for (heading, symbol, expected) in cases {
        let mut rover =
            Rover::new(world.clone(), Position::new(1, 1), heading).expect("centre is plain");
        let result = rover.command([symbol]);

        assert_eq!(result.status, Status::Ok, "{symbol} facing {heading}");
        assert_eq!(result.position, expected, "{symbol} facing {heading}");
        assert_eq!(result.heading, heading);
    }
}

#[test]
fn full_turns_restore_heading() {
    let mut rover = rover_at_centre();

    assert_eq!(
        rover.command(["L", "L", "L", "L"]),
        outcome(Status::Ok, 2, 2, Heading::North)
    );
    assert_eq!(
        rover.command(["R", "R", "R", "R"]),
        outcome(Status::Ok, 2, 2, Heading::North)
    );
}

#[test]
fn log_records_every_symbol_in_order() {
    let mut rover = rover_at_centre();

    let _ = rover.command(["F", "F", "B"]);
    let _ = rover.command(["X", "L"]);

    let symbols: Vec<&str> = rover.commands().iter().map(CommandToken::as_str).collect();
    assert_eq!(symbols, vec!["F", "F", "B", "X", "L"]);
    assert_eq!(rover.commands()[3], CommandToken::Unrecognized("X".to_owned()));
    assert_eq!(rover.commands()[4], CommandToken::Recognized(Command::TurnLeft));
}

#[test]
fn position_never_rests_on_obstacle() {
    let mut rover = rover_at_centre();
    let batch = ["F", "F", "R", "F", "R", "F", "F", "L", "L", "B", "B", "B", "B", "B"];

    let result = rover.command(batch);
    let terrain = rover
        .world()
        .terrain_at(result.position)
        .expect("rover stays inside the world");

    assert!(!terrain.is_obstacle());
}

#[test]
fn symbolic_construction_rejects_bad_input() {
    assert_eq!(
        Rover::from_symbols(World::mars(), (-1, 2), "N").unwrap_err(),
        InitError::MalformedPosition { x: -1, y: 2 }
    );
    assert!(matches!(
        Rover::from_symbols(World::mars(), (2, 2), "Q").unwrap_err(),
        InitError::InvalidHeading(_)
    ));

    let rover = Rover::from_symbols(World::mars(), (0, 4), "S").expect("valid start");
    assert_eq!(rover.position(), Position::new(0, 4));
    assert_eq!(rover.heading(), Heading::South);
}

#[test]
fn alternate_worlds_are_respected() {
    let world = World::from_rows(["PPM", "CPP"]).expect("layout parses");
    let mut rover = Rover::new(world, Position::new(0, 0), Heading::East).expect("plain start");

    assert_eq!(
        rover.command(["F", "F"]),
        outcome(Status::Obstacle, 1, 0, Heading::East)
    );
    assert_eq!(
        rover.command(["R", "F", "R", "F"]),
        outcome(Status::Obstacle, 1, 1, Heading::West)
    );
}
