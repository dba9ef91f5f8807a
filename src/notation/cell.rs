use chumsky::{Parser, prelude::*};

use crate::model::{Cell, ROWS};
use crate::notation::{COL_NAMES, Parsable, TurnNotation};

/// Rank labels, highest first so `16` is not eaten as `1` + `6`.
const RANKS: [&str; 16] = [
    "16", "15", "14", "13", "12", "11", "10", "9", "8", "7", "6", "5", "4", "3", "2", "1",
];

impl Parsable for Cell {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        let col = one_of('A'..='L')
            .map(|c| (c as u32 - 'A' as u32) as u8)
            .labelled("expected a column letter A ... L");
        // Rank n is printed row ROWS - n, which is the index of its
        // label above.
        let row = choice(std::array::from_fn::<_, 16, _>(|ix| {
            just(RANKS[ix]).to(ix as u8)
        }))
        .labelled("expected a rank number 1 ... 16");
        group((col, row)).map(|(col, row)| Cell::from_coords(row, col))
    }
}

impl Parsable for TurnNotation {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        group((
            Cell::parser(),
            group((one_of("-x"), Cell::parser())).repeated().collect::<Vec<_>>(),
        ))
        .map(|(origin, hops)| {
            let mut cells = vec![origin];
            let mut captures = Vec::with_capacity(hops.len());
            for (mark, cell) in hops {
                captures.push(mark == 'x');
                cells.push(cell);
            }
            TurnNotation { cells, captures }
        })
    }
}
