use std::{env::current_dir, fs::create_dir_all};

use arena_interface::{
    competition::{
        matches::Match,
        schedule::ScheduleRound,
        state::{Tournament, TournamentFormat},
    },
    ratings::{Division, DivisionEvent, GameOutcome, UserDivisionStatus},
};
use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(Tournament), &out_dir);
    export_schema(&schema_for!(TournamentFormat), &out_dir);
    export_schema(&schema_for!(Match), &out_dir);
    export_schema(&schema_for!(ScheduleRound), &out_dir);
    export_schema(&schema_for!(Division), &out_dir);
    export_schema(&schema_for!(UserDivisionStatus), &out_dir);
    export_schema(&schema_for!(DivisionEvent), &out_dir);
    export_schema(&schema_for!(GameOutcome), &out_dir);
}
