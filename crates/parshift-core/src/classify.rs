use std::collections::HashMap;

use tracing::debug;

use crate::code::PshiftCode;
use crate::error::{ParshiftError, Result};
use crate::models::{
    Addressee, AddressingMode, AnnotatedTurn, Classification, Conversation, Turn,
};
use crate::segment::segment;


/// Speaker and addressee of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Participants {
    speaker: String,
    target: Addressee,
}

/// Segments a conversation and assigns a participation-shift code to each turn.
pub fn segment_and_classify(conversation: &Conversation) -> Result<Vec<AnnotatedTurn>> {
    let turns = segment(conversation.messages());
    let classifications = classify(conversation.mode(), &turns)?;
    Ok(turns
        .into_iter()
        .zip(classifications)
        .map(|(turn, classification)| AnnotatedTurn {
            turn,
            classification,
        })
        .collect())
}

/// Classifies turns in order. Turn `i` only ever looks at turns `0..=i`.
pub fn classify(mode: AddressingMode, turns: &[Turn]) -> Result<Vec<Classification>> {
    let classifications = match mode {
        AddressingMode::Target => classify_targeted(turns)?,
        AddressingMode::Reply => classify_replies(turns)?,
    };
    debug!(
        mode = %mode,
        turns = turns.len(),
        "classified participation shifts"
    );
    Ok(classifications)
}

fn classify_targeted(turns: &[Turn]) -> Result<Vec<Classification>> {
    let mut out = Vec::with_capacity(turns.len());
    let mut previous = None::<Participants>;
    for (turn_index, turn) in turns.iter().enumerate() {
        let current = Participants {
            speaker: turn.speaker.clone(),
            target: turn
                .addressing
                .target_id()
                .map_or(Addressee::Group, |id| Addressee::Speaker(id.to_string())),
        };
        out.push(build_classification(turn_index, previous.as_ref(), &current)?);
        previous = Some(current);
    }
    Ok(out)
}

fn classify_replies(turns: &[Turn]) -> Result<Vec<Classification>> {
    let owners = ReplyIndex::build(turns);
    let mut out = Vec::with_capacity(turns.len());
    let mut carried = None::<Participants>;
    for (turn_index, turn) in turns.iter().enumerate() {
        let (previous, current) = match turn.reply_id() {
            // No reply link: the previous pair is the prior turn's, as in target mode.
            None => (
                carried.take(),
                Participants {
                    speaker: turn.speaker.clone(),
                    target: Addressee::Group,
                },
            ),
            Some(reply_id) => {
                let parent = &turns[owners.owner_at_or_before(reply_id, turn_index)?];
                let parent_target = match parent.reply_id() {
                    None => Addressee::Group,
                    Some(grand_id) => {
                        let grandparent = &turns[owners.owner_before(grand_id, turn_index)?];
                        Addressee::Speaker(grandparent.speaker.clone())
                    }
                };
                (
                    Some(Participants {
                        speaker: parent.speaker.clone(),
                        target: parent_target,
                    }),
                    Participants {
                        speaker: turn.speaker.clone(),
                        target: Addressee::Speaker(parent.speaker.clone()),
                    },
                )
            }
        };
        out.push(build_classification(turn_index, previous.as_ref(), &current)?);
        carried = Some(current);
    }
    Ok(out)
}

/// Message id to owning turn index, built once per conversation.
struct ReplyIndex {
    owners: HashMap<i64, usize>,
}

impl ReplyIndex {
    fn build(turns: &[Turn]) -> Self {
        let owners = turns
            .iter()
            .enumerate()
            .flat_map(|(idx, turn)| turn.member_ids.iter().map(move |id| (*id, idx)))
            .collect();
        Self { owners }
    }

    fn owner_at_or_before(&self, reply_id: i64, turn_index: usize) -> Result<usize> {
        self.owners
            .get(&reply_id)
            .copied()
            .filter(|owner| *owner <= turn_index)
            .ok_or(ParshiftError::UnresolvableReplyChain {
                turn_index,
                reply_id,
            })
    }

    fn owner_before(&self, reply_id: i64, turn_index: usize) -> Result<usize> {
        self.owners
            .get(&reply_id)
            .copied()
            .filter(|owner| *owner < turn_index)
            .ok_or(ParshiftError::UnresolvableReplyChain {
                turn_index,
                reply_id,
            })
    }
}

fn build_classification(
    turn_index: usize,
    previous: Option<&Participants>,
    current: &Participants,
) -> Result<Classification> {
    // The first turn has no predecessor, whatever its reply link says.
    let previous = previous.filter(|_| turn_index > 0);
    let code = previous
        .map(|previous| code_for(previous, current))
        .transpose()?;
    Ok(Classification {
        turn_index,
        code,
        prev_speaker: previous.map(|p| p.speaker.clone()),
        prev_target: previous.map(|p| p.target.clone()),
        speaker: current.speaker.clone(),
        target: current.target.clone(),
    })
}

fn code_for(previous: &Participants, current: &Participants) -> Result<PshiftCode> {
    encode(
        &previous.speaker,
        &previous.target,
        &current.speaker,
        &current.target,
    )
    .parse()
}

/// Spells the code for `a to b, c to d`. The current speaker is always `A`.
pub(crate) fn encode(a: &str, b: &Addressee, c: &str, d: &Addressee) -> String {
    let mut out = String::with_capacity(5);
    out.push('A');
    out.push(if b.is_group() { '0' } else { 'B' });
    out.push('-');
    out.push(if c == a {
        'A'
    } else if b.is_speaker(c) {
        'B'
    } else {
        'X'
    });
    out.push(match d {
        Addressee::Group => '0',
        Addressee::Speaker(id) if id == a => 'A',
        _ if d == b => 'B',
        _ => 'Y',
    });
    out
}
