/*
ENSnano, a 3d graphical application for DNA nanostructures.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::*;
use std::path::PathBuf;

fn c(strand: usize, position: usize) -> Coordinate {
    Coordinate::new(strand, position)
}

fn fixture_path(name: &str) -> PathBuf {
    let mut ret = PathBuf::from(std::env!("CARGO_MANIFEST_DIR"));
    ret.push("tests");
    ret.push(name);
    ret
}

/// A strand that goes right on even strands and left on odd ones, visiting every slot
fn serpentine(nb_strands: usize, nb_positions: usize) -> Vec<Coordinate> {
    let mut ret = Vec::with_capacity(nb_strands * nb_positions);
    for strand in 0..nb_strands {
        if strand % 2 == 0 {
            ret.extend((0..nb_positions).map(|p| c(strand, p)));
        } else {
            ret.extend((0..nb_positions).rev().map(|p| c(strand, p)));
        }
    }
    ret
}

fn network_with_chains(nb_strands: usize, nb_positions: usize, chains: &[&[Coordinate]]) -> Network {
    let mut builder = NetworkBuilder::new(nb_strands, nb_positions);
    for chain in chains {
        builder.chain(chain).unwrap();
    }
    builder.build()
}

fn cyclic_network() -> Network {
    let mut builder = NetworkBuilder::new(2, 4);
    builder
        .chain(&[c(0, 0), c(0, 1), c(0, 2), c(0, 3)])
        .unwrap()
        .connect(c(0, 3), c(0, 0))
        .unwrap();
    builder.chain(&[c(1, 3), c(1, 2), c(1, 1)]).unwrap();
    builder.build()
}

fn letters(length: usize) -> String {
    "ACGTTGCA".chars().cycle().take(length).collect()
}

fn no_filler(_: usize) -> String {
    panic!("filler should not be used")
}

// Traversal
//============================================================================================

#[test]
fn single_steps() {
    let network = network_with_chains(1, 4, &[&[c(0, 0), c(0, 1), c(0, 2)]]);
    assert_eq!(network.step_forward(c(0, 0)), Ok(Some(c(0, 1))));
    assert_eq!(network.step_forward(c(0, 2)), Ok(None));
    assert_eq!(network.step_backward(c(0, 1)), Ok(Some(c(0, 0))));
    assert_eq!(network.step_backward(c(0, 0)), Ok(None));
    assert_eq!(network.step_forward(c(0, 3)), Ok(None));
}

#[test]
fn step_outside_of_grid() {
    let network = network_with_chains(1, 4, &[&[c(0, 0), c(0, 1)]]);
    assert_eq!(
        network.step_forward(c(0, 4)),
        Err(TraversalError::InvalidCoordinate(c(0, 4)))
    );
    assert_eq!(
        network.step_backward(c(1, 0)),
        Err(TraversalError::InvalidCoordinate(c(1, 0)))
    );
    assert_eq!(
        network.walk_forward(c(3, 3)),
        Err(TraversalError::InvalidCoordinate(c(3, 3)))
    );
}

#[test]
fn walks_reach_both_ends() {
    let chain = [c(0, 2), c(0, 3), c(1, 3), c(1, 2), c(1, 1)];
    let network = network_with_chains(2, 4, &[&chain]);
    for coordinate in chain.iter() {
        assert_eq!(network.walk_forward(*coordinate), Ok(Walk::Reached(c(1, 1))));
        assert_eq!(network.walk_backward(*coordinate), Ok(Walk::Reached(c(0, 2))));
    }
    assert_eq!(network.forward_length(c(0, 2)), Ok(5));
    assert_eq!(network.forward_path(c(0, 2)), Ok(chain.to_vec()));
}

#[test]
fn walk_from_empty_slot() {
    let network = network_with_chains(2, 4, &[&[c(0, 0), c(0, 1)]]);
    assert_eq!(network.walk_forward(c(1, 2)), Ok(Walk::Empty));
    assert_eq!(network.walk_backward(c(1, 2)), Ok(Walk::Empty));
    assert_eq!(network.forward_length(c(1, 2)), Ok(0));
    assert_eq!(Walk::Empty.coordinate(), None);
}

#[test]
fn walks_detect_cycles() {
    let network = cyclic_network();
    assert_eq!(
        network.walk_forward(c(0, 2)),
        Err(TraversalError::CycleDetected(c(0, 2)))
    );
    assert_eq!(
        network.walk_backward(c(0, 1)),
        Err(TraversalError::CycleDetected(c(0, 1)))
    );
    assert_eq!(
        network.forward_length(c(0, 0)),
        Err(TraversalError::CycleDetected(c(0, 0)))
    );
    // The open strand of the same network is fine
    assert_eq!(network.walk_forward(c(1, 3)), Ok(Walk::Reached(c(1, 1))));
}

#[test]
fn walk_into_a_loop_that_avoids_the_origin() {
    let mut builder = NetworkBuilder::new(1, 4);
    builder
        .set(c(0, 0), LinkRecord::new(None, Some(c(0, 1))))
        .unwrap()
        .set(c(0, 1), LinkRecord::new(Some(c(0, 0)), Some(c(0, 2))))
        .unwrap()
        .set(c(0, 2), LinkRecord::new(Some(c(0, 1)), Some(c(0, 1))))
        .unwrap();
    let network = builder.build();
    assert_eq!(
        network.walk_forward(c(0, 0)),
        Err(TraversalError::CycleDetected(c(0, 0)))
    );
}

#[test]
fn backward_then_forward_gives_the_end_of_the_component() {
    let long = serpentine(3, 5);
    let short = [c(3, 0), c(3, 1)];
    let network = network_with_chains(4, 5, &[&long, &short]);
    for chain in [&long[..], &short[..]] {
        let end = *chain.last().unwrap();
        for coordinate in chain {
            let start = network.walk_backward(*coordinate).unwrap().coordinate().unwrap();
            assert_eq!(start, chain[0]);
            assert_eq!(network.walk_forward(start), Ok(Walk::Reached(end)));
        }
    }
}

// Breakpoint discovery
//============================================================================================

fn three_strands_network() -> Network {
    network_with_chains(
        3,
        6,
        &[
            &[c(0, 5), c(0, 4), c(1, 4), c(1, 5)],
            &[c(2, 0), c(2, 1), c(2, 2), c(1, 2), c(1, 1), c(1, 0), c(0, 0)],
            &[c(2, 5), c(2, 4)],
        ],
    )
}

#[test]
fn both_discoveries_find_the_same_starts() {
    let network = three_strands_network();
    let expected: std::collections::BTreeSet<_> =
        [c(0, 5), c(2, 0), c(2, 5)].iter().cloned().collect();
    assert_eq!(
        find_component_starts(&network, Discovery::Exhaustive),
        Ok(expected.clone())
    );
    assert_eq!(
        find_component_starts(&network, Discovery::Memoized),
        Ok(expected)
    );
}

#[test]
fn discovery_is_idempotent() {
    let network = three_strands_network();
    let first = discover_components(&network, NetworkKind::Staple, Discovery::Memoized).unwrap();
    let second = discover_components(&network, NetworkKind::Staple, Discovery::Memoized).unwrap();
    let exhaustive =
        discover_components(&network, NetworkKind::Staple, Discovery::Exhaustive).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, exhaustive);
    assert_eq!(
        first,
        vec![
            Component {
                start: c(0, 5),
                end: c(1, 5),
                length: 4
            },
            Component {
                start: c(2, 0),
                end: c(0, 0),
                length: 7
            },
            Component {
                start: c(2, 5),
                end: c(2, 4),
                length: 2
            },
        ]
    );
}

#[test]
fn component_lengths_match_forward_walks() {
    let network = three_strands_network();
    for component in discover_components(&network, NetworkKind::Staple, Discovery::Exhaustive)
        .unwrap()
    {
        let path = network.forward_path(component.start).unwrap();
        assert_eq!(path.len(), component.length);
        assert_eq!(path.last(), Some(&component.end));
    }
}

#[test]
fn cycles_have_no_breakpoint() {
    let network = cyclic_network();
    for discovery in [Discovery::Exhaustive, Discovery::Memoized] {
        assert!(matches!(
            find_component_starts(&network, discovery),
            Err(TraversalError::CycleDetected(_))
        ));
        assert!(matches!(
            discover_components(&network, NetworkKind::Scaffold, discovery),
            Err(DesignError::NoBreakpoint {
                network: NetworkKind::Scaffold,
                ..
            })
        ));
    }
}

#[test]
fn empty_network_has_no_strand() {
    let network = NetworkBuilder::new(2, 3).build();
    for discovery in [Discovery::Exhaustive, Discovery::Memoized] {
        assert_eq!(
            discover_components(&network, NetworkKind::Scaffold, discovery),
            Err(DesignError::NoStrandFound(NetworkKind::Scaffold))
        );
    }
}

#[test]
fn scaffold_circularity() {
    let component = |start, end| Component {
        start,
        end,
        length: 10,
    };
    assert!(is_circular(&component(c(0, 4), c(0, 3))));
    assert!(is_circular(&component(c(1, 3), c(1, 4))));
    assert!(!is_circular(&component(c(0, 3), c(0, 4))));
    assert!(!is_circular(&component(c(1, 4), c(1, 3))));
    assert!(!is_circular(&component(c(0, 4), c(2, 3))));
}

// Scaffold assignment
//============================================================================================

#[test]
fn long_scaffold_receives_the_raw_sequence_verbatim() {
    let chain = serpentine(4, 1766);
    let network = network_with_chains(4, 1766, &[&chain]);
    let components =
        discover_components(&network, NetworkKind::Scaffold, Discovery::Memoized).unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].length, 7064);

    let raw = letters(7064);
    let assignment =
        assign_scaffold_sequences(&network, &components, &raw, &mut no_filler).unwrap();
    assert_eq!(assignment.primary, 0);
    let scaffold = &assignment.components[0];
    assert_eq!(scaffold.sequence(), raw);
    let visited: Vec<_> = scaffold.bases.iter().map(|b| b.coordinate).collect();
    assert_eq!(visited, chain);
}

#[test]
fn too_short_sequence_is_rejected() {
    let network = network_with_chains(2, 5, &[&serpentine(2, 5)]);
    let components =
        discover_components(&network, NetworkKind::Scaffold, Discovery::Memoized).unwrap();
    let result = assign_scaffold_sequences(&network, &components, &letters(9), &mut no_filler);
    assert_eq!(
        result.err(),
        Some(DesignError::SequenceTooShort {
            supplied: 9,
            required: 10
        })
    );
}

#[test]
fn other_scaffolds_receive_filler() {
    let long = [c(0, 0), c(0, 1), c(0, 2), c(0, 3)];
    let short = [c(1, 3), c(1, 2)];
    let network = network_with_chains(2, 4, &[&long, &short]);
    let components =
        discover_components(&network, NetworkKind::Scaffold, Discovery::Memoized).unwrap();
    let mut requested = Vec::new();
    let mut filler = |length: usize| {
        requested.push(length);
        "G".repeat(length)
    };
    let assignment =
        assign_scaffold_sequences(&network, &components, "ATTACA", &mut filler).unwrap();
    assert_eq!(requested, vec![2]);
    assert_eq!(assignment.primary, 0);
    assert_eq!(assignment.components[0].sequence(), "ATTA");
    assert_eq!(assignment.components[1].sequence(), "GG");
    assert_eq!(assignment.lookup.get(c(1, 2)), Some('G'));
}

#[test]
fn lookup_covers_exactly_the_scaffold_walks() {
    let network = three_strands_network();
    let components =
        discover_components(&network, NetworkKind::Scaffold, Discovery::Memoized).unwrap();
    let mut filler = GcFiller::new(&FillerParameters::DEFAULT);
    let assignment =
        assign_scaffold_sequences(&network, &components, &letters(7), &mut filler).unwrap();

    let mut visited: Vec<Coordinate> = components
        .iter()
        .flat_map(|c| network.forward_path(c.start).unwrap())
        .collect();
    visited.sort();
    let in_lookup: Vec<_> = assignment.lookup.coordinates().collect();
    assert_eq!(in_lookup, visited);
    assert_eq!(assignment.lookup.len(), 13);
    for (component, sequenced) in components.iter().zip(assignment.components.iter()) {
        assert_eq!(sequenced.len(), component.length);
        assert_eq!(sequenced.start(), Some(component.start));
        assert_eq!(sequenced.end(), Some(component.end));
        for base in sequenced.bases.iter() {
            assert_eq!(assignment.lookup.get(base.coordinate), Some(base.letter));
        }
    }
    assert_eq!(assignment.lookup.get(c(0, 1)), None);
}

#[test]
fn equal_length_scaffolds_prefer_the_lowest_start() {
    let components = [
        Component {
            start: c(2, 0),
            end: c(2, 3),
            length: 4,
        },
        Component {
            start: c(1, 3),
            end: c(1, 0),
            length: 4,
        },
        Component {
            start: c(0, 0),
            end: c(0, 1),
            length: 2,
        },
    ];
    assert_eq!(primary_component(&components), Some(1));
    assert_eq!(primary_component(&[]), None);
}

#[test]
fn filler_of_wrong_length_is_rejected() {
    let network = network_with_chains(2, 4, &[&[c(0, 0), c(0, 1), c(0, 2)], &[c(1, 0), c(1, 1)]]);
    let components =
        discover_components(&network, NetworkKind::Scaffold, Discovery::Memoized).unwrap();
    let mut filler = |_: usize| String::from("A");
    let result = assign_scaffold_sequences(&network, &components, "TTT", &mut filler);
    assert_eq!(
        result.err(),
        Some(DesignError::InvalidFiller {
            expected: 2,
            found: 1
        })
    );
}

// Complement resolution
//============================================================================================

#[test]
fn complement_of_bases() {
    assert_eq!(complement('A'), Some('T'));
    assert_eq!(complement('T'), Some('A'));
    assert_eq!(complement('G'), Some('C'));
    assert_eq!(complement('C'), Some('G'));
    assert_eq!(complement('N'), None);
}

#[test]
fn staples_are_complementary_or_default() {
    let scaffold_chain = [c(0, 0), c(0, 1), c(0, 2), c(0, 3)];
    let scaffold = network_with_chains(2, 4, &[&scaffold_chain]);
    // The staple overhangs on strand 1, where there is no scaffold
    let staple_chain = [c(1, 1), c(1, 0), c(0, 3), c(0, 2), c(0, 1)];
    let staples = network_with_chains(2, 4, &[&staple_chain]);

    let scaffold_components =
        discover_components(&scaffold, NetworkKind::Scaffold, Discovery::Memoized).unwrap();
    let assignment =
        assign_scaffold_sequences(&scaffold, &scaffold_components, "GATC", &mut no_filler)
            .unwrap();
    let staple_components =
        discover_components(&staples, NetworkKind::Staple, Discovery::Exhaustive).unwrap();
    let sequenced =
        resolve_staple_sequences(&staples, &staple_components, &assignment.lookup, 'A').unwrap();

    assert_eq!(sequenced.len(), 1);
    assert_eq!(sequenced[0].sequence(), "AAGAT");
    for base in sequenced[0].bases.iter() {
        match assignment.lookup.get(base.coordinate) {
            Some(letter) => assert_eq!(complement(letter), Some(base.letter)),
            None => assert_eq!(base.letter, 'A'),
        }
    }
    let unpaired: Vec<_> = unpaired_bases(&sequenced, &assignment.lookup).collect();
    assert_eq!(unpaired, vec![c(1, 1), c(1, 0)]);
}

#[test]
fn invalid_scaffold_letter_cannot_be_complemented() {
    let scaffold = network_with_chains(1, 3, &[&[c(0, 0), c(0, 1), c(0, 2)]]);
    let staples = network_with_chains(1, 3, &[&[c(0, 2), c(0, 1)]]);
    let scaffold_components =
        discover_components(&scaffold, NetworkKind::Scaffold, Discovery::Memoized).unwrap();
    let assignment =
        assign_scaffold_sequences(&scaffold, &scaffold_components, "ANA", &mut no_filler)
            .unwrap();
    let staple_components =
        discover_components(&staples, NetworkKind::Staple, Discovery::Exhaustive).unwrap();
    assert_eq!(
        resolve_staple_sequences(&staples, &staple_components, &assignment.lookup, 'A'),
        Err(DesignError::InvalidBase {
            letter: 'N',
            coordinate: c(0, 1)
        })
    );
}

// Validation
//============================================================================================

fn staple_with_sequence(sequence: &str) -> SequencedComponent {
    SequencedComponent::new(
        sequence
            .chars()
            .enumerate()
            .map(|(i, letter)| SequencedBase {
                coordinate: c(0, i),
                letter,
            })
            .collect(),
    )
}

#[test]
fn staple_length_band() {
    let staples = [
        staple_with_sequence(&letters(8)),
        staple_with_sequence(&letters(61)),
        staple_with_sequence(&letters(30)),
        staple_with_sequence(&letters(15)),
        staple_with_sequence(&letters(60)),
    ];
    let warnings = validate_staples(&staples, &ValidationParameters::DEFAULT);
    assert_eq!(
        warnings,
        vec![
            StapleWarning::TooShort {
                staple: 0,
                start: c(0, 0),
                length: 8,
                min: 15
            },
            StapleWarning::TooLong {
                staple: 1,
                start: c(0, 0),
                length: 61,
                max: 60
            },
        ]
    );
}

#[test]
fn poly_a_at_the_start() {
    let flagged = staple_with_sequence("AAAAAAAGCTTGCATGCATGC");
    let warnings = validate_staples(&[flagged], &ValidationParameters::DEFAULT);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        warnings[0],
        StapleWarning::TerminalRunStart { staple: 0, run: 7, letter: 'A', .. }
    ));

    for i in 0..7 {
        let mut sequence: Vec<char> = "AAAAAAAGCTTGCATGCATGC".chars().collect();
        sequence[i] = 'C';
        let sequence: String = sequence.into_iter().collect();
        let warnings = validate_staples(
            &[staple_with_sequence(&sequence)],
            &ValidationParameters::DEFAULT,
        );
        assert!(warnings.is_empty(), "{:?}", warnings);
    }
}

#[test]
fn poly_a_at_the_end() {
    let staple = staple_with_sequence("GCTTGCATGCATGCAAAAAAA");
    let warnings = validate_staples(&[staple], &ValidationParameters::DEFAULT);
    assert_eq!(
        warnings,
        vec![StapleWarning::TerminalRunEnd {
            staple: 0,
            start: c(0, 0),
            letter: 'A',
            run: 7
        }]
    );
    assert_eq!(
        warnings[0].to_string(),
        "staple 0 at 0[0] has 7 or more consecutive A's at the end"
    );
}

// Filler
//============================================================================================

#[test]
fn filler_is_reproducible() {
    let mut first = GcFiller::new(&FillerParameters::DEFAULT);
    let mut second = GcFiller::new(&FillerParameters::DEFAULT);
    let a = first.generate(500);
    assert_eq!(a.len(), 500);
    assert_eq!(a, second.generate(500));
    assert!(a.chars().all(|c| matches!(c, 'A' | 'T' | 'G' | 'C')));
    assert_eq!(first.generate(0), "");
}

#[test]
fn filler_respects_homopolymer_bound() {
    let parameters = FillerParameters {
        seed: 3,
        gc_content: 1.,
        max_homopolymer: 2,
    };
    let sequence = GcFiller::new(&parameters).generate(2000);
    assert!(sequence.chars().all(|c| c == 'G' || c == 'C'));
    assert!(!sequence.contains("GGG"));
    assert!(!sequence.contains("CCC"));
}

// Parameters and input files
//============================================================================================

#[test]
fn parameters_default_missing_fields() {
    let parameters: Parameters = serde_json::from_str(
        r#"{"validation": {"max_staple_length": 80}, "scaffold_circularity": "error"}"#,
    )
    .unwrap();
    assert_eq!(parameters.validation.max_staple_length, 80);
    assert_eq!(parameters.validation.min_staple_length, 15);
    assert_eq!(parameters.scaffold_circularity, Circularity::Error);
    assert_eq!(parameters.filler, FillerParameters::DEFAULT);
    assert_eq!(parameters.unpaired_letter, 'A');
}

#[test]
fn parse_sequence_file_content() {
    assert_eq!(
        parse_scaffold_sequence("acgt\nACGT \r\n  tt").unwrap(),
        "ACGTACGTTT"
    );
    assert!(matches!(
        parse_scaffold_sequence(" \n"),
        Err(SequenceFileError::Empty)
    ));
    assert!(matches!(
        parse_scaffold_sequence("ACG\nTXA"),
        Err(SequenceFileError::InvalidCharacter {
            position: 4,
            character: 'X'
        })
    ));
}

#[test]
fn read_two_helices_cadnano() {
    let lattice = Lattice::from_cadnano_file(fixture_path("two_helices.json")).unwrap();
    assert_eq!(lattice.scaffold.nb_strands(), 2);
    assert_eq!(lattice.scaffold.nb_positions(), 8);
    assert_eq!(lattice.scaffold.nb_bases(), 16);
    assert_eq!(lattice.staples.nb_bases(), 16);
    assert!(lattice.helices_with_skips.is_empty());
    assert_eq!(
        lattice.scaffold.link(c(0, 4)),
        Some(&LinkRecord::new(None, Some(c(0, 5))))
    );
    assert_eq!(
        lattice.staples.link(c(1, 3)),
        Some(&LinkRecord::new(Some(c(1, 2)), Some(c(0, 3))))
    );
}

#[test]
fn sequence_two_helices() {
    let _ = env_logger::builder().is_test(true).try_init();
    let lattice = Lattice::from_cadnano_file(fixture_path("two_helices.json")).unwrap();
    let raw = read_scaffold_sequence(fixture_path("two_helices_scaffold.txt")).unwrap();
    assert_eq!(raw, "AAAACCCCGGGGTTTT");
    let design =
        SequencedDesign::new(&lattice, &raw, &mut no_filler, &Parameters::DEFAULT).unwrap();

    assert_eq!(design.scaffolds.len(), 1);
    let scaffold = design.primary().unwrap();
    assert_eq!(scaffold.start(), Some(c(0, 4)));
    assert_eq!(scaffold.end(), Some(c(0, 3)));
    assert_eq!(scaffold.sequence(), raw);

    let staples: Vec<_> = design
        .staples
        .iter()
        .map(|s| (s.start().unwrap(), s.end().unwrap(), s.sequence()))
        .collect();
    assert_eq!(
        staples,
        vec![
            (c(1, 0), c(0, 0), String::from("CCCCAAAA")),
            (c(1, 4), c(0, 4), String::from("GGGGTTTT")),
        ]
    );

    // Both staples are too short, the scaffold is circular and every staple base is paired
    assert_eq!(design.warnings.len(), 2);
    assert!(design
        .warnings
        .iter()
        .all(|w| matches!(w, DesignWarning::Staple(StapleWarning::TooShort { length: 8, .. }))));
}

#[test]
fn non_circular_scaffold_policy() {
    let scaffold = network_with_chains(1, 6, &[&[c(0, 0), c(0, 1), c(0, 2)]]);
    let staples = network_with_chains(1, 6, &[&[c(0, 2), c(0, 1), c(0, 0)]]);
    let lattice = Lattice::new(scaffold, staples).unwrap();

    let mut parameters = Parameters::DEFAULT;
    let design = SequencedDesign::new(&lattice, "GGC", &mut no_filler, &parameters).unwrap();
    assert!(design.warnings.contains(&DesignWarning::ScaffoldNotCircular {
        start: c(0, 0),
        end: c(0, 2)
    }));
    assert_eq!(design.staples[0].sequence(), "GCC");

    parameters.scaffold_circularity = Circularity::Error;
    assert_eq!(
        SequencedDesign::new(&lattice, "GGC", &mut no_filler, &parameters).err(),
        Some(DesignError::ScaffoldNotCircular {
            start: c(0, 0),
            end: c(0, 2)
        })
    );
}

#[test]
fn inconsistent_links_are_rejected() {
    let mut builder = NetworkBuilder::new(1, 3);
    builder
        .set(c(0, 0), LinkRecord::new(None, Some(c(0, 1))))
        .unwrap();
    let scaffold = builder.build();
    let staples = NetworkBuilder::new(1, 3).build();
    assert!(matches!(
        Lattice::new(scaffold, staples),
        Err(LatticeError::InconsistentLink {
            network: NetworkKind::Scaffold,
            ..
        })
    ));
}

#[test]
fn empty_or_mismatched_lattices() {
    let empty = NetworkBuilder::new(0, 5).build();
    assert!(matches!(
        Lattice::new(empty.clone(), empty),
        Err(LatticeError::EmptyDesign)
    ));
    assert!(matches!(
        Lattice::new(NetworkBuilder::new(1, 4).build(), NetworkBuilder::new(2, 4).build()),
        Err(LatticeError::MismatchedNetworks)
    ));
}

#[test]
fn overhanging_staple_is_reported() {
    let scaffold = network_with_chains(2, 4, &[&[c(0, 0), c(0, 1), c(0, 2), c(0, 3)]]);
    let staples = network_with_chains(2, 4, &[&[c(1, 1), c(1, 0), c(0, 3), c(0, 2), c(0, 1)]]);
    let lattice = Lattice::new(scaffold, staples).unwrap();
    let design =
        SequencedDesign::new(&lattice, "GATC", &mut no_filler, &Parameters::DEFAULT).unwrap();

    assert_eq!(design.staples[0].sequence(), "AAGAT");
    assert!(design.warnings.contains(&DesignWarning::StaplesNotPaired {
        first_unpaired: c(1, 1),
        nb_unpaired: 2
    }));
    // The only staple is too short
    let flagged: Vec<_> = design.flagged_staples().into_iter().collect();
    assert_eq!(flagged, vec![0]);
}

// Cadnano loader errors
//============================================================================================

fn empty_links(length: usize) -> Vec<[isize; 4]> {
    vec![[-1; 4]; length]
}

fn vstrand(num: isize, scaf: Vec<[isize; 4]>, stap: Vec<[isize; 4]>) -> serde_json::Value {
    let skip = vec![0; scaf.len()];
    serde_json::json!({
        "stapLoop": [],
        "skip": skip.clone(),
        "scafLoop": [],
        "stap": stap,
        "loop": skip,
        "stap_colors": [],
        "num": num,
        "scaf": scaf,
        "col": 0,
        "row": 0,
    })
}

fn load_cadnano(vstrands: Vec<serde_json::Value>) -> Result<Lattice, LatticeError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("design.json");
    let content = serde_json::json!({
        "name": "design.json",
        "vstrands": vstrands,
    });
    std::fs::write(&path, content.to_string()).unwrap();
    Lattice::from_cadnano_file(&path)
}

#[test]
fn cadnano_helices_must_have_the_same_length() {
    let result = load_cadnano(vec![
        vstrand(0, empty_links(4), empty_links(4)),
        vstrand(1, empty_links(3), empty_links(3)),
    ]);
    assert!(matches!(
        result,
        Err(LatticeError::NonRectangular {
            num: 1,
            expected: 4,
            found: 3
        })
    ));
}

#[test]
fn cadnano_helix_numbers() {
    let duplicate = load_cadnano(vec![
        vstrand(0, empty_links(4), empty_links(4)),
        vstrand(0, empty_links(4), empty_links(4)),
    ]);
    assert!(matches!(duplicate, Err(LatticeError::DuplicateHelix(0))));

    let negative = load_cadnano(vec![vstrand(-2, empty_links(4), empty_links(4))]);
    assert!(matches!(
        negative,
        Err(LatticeError::NegativeHelixNumber(-2))
    ));
}

#[test]
fn cadnano_links_must_be_in_the_grid() {
    let mut scaf = empty_links(4);
    scaf[1] = [0, 7, -1, -1];
    let result = load_cadnano(vec![vstrand(0, scaf, empty_links(4))]);
    assert!(matches!(
        result,
        Err(LatticeError::MalformedLink {
            network: NetworkKind::Scaffold,
            link: (0, 7),
            ..
        })
    ));

    let mut stap = empty_links(4);
    stap[2] = [-1, -1, -1, 1];
    let result = load_cadnano(vec![vstrand(0, empty_links(4), stap)]);
    match result {
        Err(LatticeError::MalformedLink { network, at, link }) => {
            assert_eq!(network, NetworkKind::Staple);
            assert_eq!(at, c(0, 2));
            assert_eq!(link, (-1, 1));
        }
        _ => panic!("expected a malformed staple link"),
    }
}

#[test]
fn cadnano_missing_helix_and_skips() {
    let scaf = vec![[-1, -1, 0, 1], [0, 0, -1, -1]];
    let stap = vec![[-1, -1, 2, 1], [2, 0, -1, -1]];
    let mut with_skip = vstrand(2, empty_links(2), stap);
    with_skip["skip"] = serde_json::json!([0, -1]);
    let lattice = load_cadnano(vec![vstrand(0, scaf, empty_links(2)), with_skip]).unwrap();

    assert_eq!(lattice.scaffold.nb_strands(), 3);
    assert_eq!(lattice.scaffold.nb_bases(), 2);
    assert_eq!(lattice.staples.nb_bases(), 2);
    for position in 0..2 {
        assert_eq!(lattice.scaffold.link(c(1, position)), Some(&LinkRecord::EMPTY));
        assert_eq!(lattice.staples.link(c(1, position)), Some(&LinkRecord::EMPTY));
    }
    assert_eq!(
        lattice.staples.link(c(2, 0)),
        Some(&LinkRecord::new(None, Some(c(2, 1))))
    );
    assert_eq!(lattice.helices_with_skips, vec![2]);
}

#[test]
fn scaffold_lookup_outside_of_grid() {
    let network = network_with_chains(1, 3, &[&[c(0, 0), c(0, 1), c(0, 2)]]);
    let components =
        discover_components(&network, NetworkKind::Scaffold, Discovery::Memoized).unwrap();
    let assignment =
        assign_scaffold_sequences(&network, &components, "ACG", &mut no_filler).unwrap();
    assert_eq!(assignment.lookup.get(c(0, 1)), Some('C'));
    assert_eq!(assignment.lookup.get(c(1, 0)), None);
    assert_eq!(assignment.lookup.get(c(0, 3)), None);
    assert_eq!(assignment.lookup.get(c(usize::MAX / 2, 0)), None);
    assert_eq!(assignment.lookup.get(c(usize::MAX, usize::MAX)), None);
}
