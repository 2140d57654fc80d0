use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use serde::Serialize;
use solana_program::{
    program_error::ProgramError,
    program_pack::{Pack, Sealed},
};

use crate::{
    codec::{pack_u64, unpack_u64},
    constants::SCHEDULE_LEN,
    error::VestingError,
};

/// One tranche of a vesting contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VestingSchedule {
    /// Unix timestamp (seconds) from which the tranche can be unlocked
    pub release_time: u64,
    /// Token amount in base units. Zero once the tranche has been paid out
    pub amount: u64,
}

impl VestingSchedule {
    pub fn new(release_time: u64, amount: u64) -> Self {
        Self {
            release_time,
            amount,
        }
    }

    /// A tranche is due once the clock reaches its release time (inclusive).
    /// Timestamps before the epoch never release anything.
    pub fn is_due(&self, now: i64) -> bool {
        u64::try_from(now).map_or(false, |now| self.release_time <= now)
    }

    pub fn is_paid(&self) -> bool {
        self.amount == 0
    }
}

impl Sealed for VestingSchedule {}

impl Pack for VestingSchedule {
    const LEN: usize = SCHEDULE_LEN;

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, SCHEDULE_LEN];
        let (release_time_dst, amount_dst) = mut_array_refs![dst, 8, 8];
        *release_time_dst = pack_u64(self.release_time);
        *amount_dst = pack_u64(self.amount);
    }

    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        if src.len() != SCHEDULE_LEN {
            return Err(VestingError::EncodingError.into());
        }
        let src = array_ref![src, 0, SCHEDULE_LEN];
        let (release_time, amount) = array_refs![src, 8, 8];
        Ok(Self {
            release_time: unpack_u64(release_time)?,
            amount: unpack_u64(amount)?,
        })
    }
}

/// Decodes a run of schedules laid out back to back.
pub fn unpack_schedules(input: &[u8]) -> Result<Vec<VestingSchedule>, VestingError> {
    if input.len() % SCHEDULE_LEN != 0 {
        return Err(VestingError::MalformedAccountError);
    }
    input
        .chunks_exact(SCHEDULE_LEN)
        .map(|chunk| {
            VestingSchedule::unpack_from_slice(chunk).map_err(|_| VestingError::EncodingError)
        })
        .collect()
}

/// Writes `schedules` into `target`, which must hold exactly that many records.
pub fn pack_schedules_into_slice(
    schedules: &[VestingSchedule],
    target: &mut [u8],
) -> Result<(), VestingError> {
    if target.len() != schedules.len() * SCHEDULE_LEN {
        return Err(VestingError::MalformedAccountError);
    }
    for (schedule, dst) in schedules.iter().zip(target.chunks_exact_mut(SCHEDULE_LEN)) {
        schedule.pack_into_slice(dst);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_layout() {
        let schedule = VestingSchedule::new(30_767_976, 969);
        let mut packed = [0u8; SCHEDULE_LEN];
        schedule.pack_into_slice(&mut packed);

        let mut expected = Vec::with_capacity(SCHEDULE_LEN);
        expected.extend_from_slice(&30_767_976u64.to_le_bytes());
        expected.extend_from_slice(&969u64.to_le_bytes());
        assert_eq!(packed.to_vec(), expected);

        assert_eq!(VestingSchedule::unpack_from_slice(&packed).unwrap(), schedule);
    }

    #[test]
    fn test_schedule_rejects_wrong_width() {
        assert_eq!(
            VestingSchedule::unpack_from_slice(&[0u8; 15]),
            Err(VestingError::EncodingError.into())
        );
        assert_eq!(
            VestingSchedule::unpack_from_slice(&[0u8; 17]),
            Err(VestingError::EncodingError.into())
        );
    }

    #[test]
    fn test_release_time_is_inclusive() {
        let schedule = VestingSchedule::new(100, 10);
        assert!(!schedule.is_due(99));
        assert!(schedule.is_due(100));
        assert!(schedule.is_due(101));
        assert!(!VestingSchedule::new(0, 1).is_due(-1));
    }

    #[test]
    fn test_schedules_run() {
        let schedules = vec![
            VestingSchedule::new(1, 2),
            VestingSchedule::new(3, 4),
            VestingSchedule::new(u64::MAX, u64::MAX),
        ];
        let mut buf = vec![0u8; 3 * SCHEDULE_LEN];
        pack_schedules_into_slice(&schedules, &mut buf).unwrap();
        assert_eq!(unpack_schedules(&buf).unwrap(), schedules);

        assert_eq!(
            pack_schedules_into_slice(&schedules, &mut buf[..32]),
            Err(VestingError::MalformedAccountError)
        );
        assert_eq!(
            unpack_schedules(&buf[..40]),
            Err(VestingError::MalformedAccountError)
        );
    }
}
