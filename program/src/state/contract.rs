use std::fmt;

use serde::Serialize;
use solana_program::{program_pack::Pack, pubkey::Pubkey};

use super::{pack_schedules_into_slice, unpack_schedules, VestingSchedule, VestingScheduleHeader};
use crate::{
    constants::{HEADER_LEN, SCHEDULE_LEN},
    error::VestingError,
};

/// Decoded vesting account: the header followed by every tranche, paid or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContractInfo {
    pub header: VestingScheduleHeader,
    pub schedules: Vec<VestingSchedule>,
}

impl ContractInfo {
    /// Byte length of a vesting account holding `number_of_schedules` tranches.
    pub fn state_size(number_of_schedules: usize) -> Result<usize, VestingError> {
        number_of_schedules
            .checked_mul(SCHEDULE_LEN)
            .and_then(|len| len.checked_add(HEADER_LEN))
            .ok_or(VestingError::ArithmeticOverflow)
    }

    /// Number of tranche slots an allocated account of `data_len` bytes holds.
    pub fn schedule_capacity(data_len: usize) -> Result<usize, VestingError> {
        let tail = data_len
            .checked_sub(HEADER_LEN)
            .ok_or(VestingError::MalformedAccountError)?;
        if tail == 0 || tail % SCHEDULE_LEN != 0 {
            return Err(VestingError::MalformedAccountError);
        }
        Ok(tail / SCHEDULE_LEN)
    }

    /// Builds the state written by Create. Fails closed if the tranche total
    /// does not fit in a u64.
    pub fn new(
        destination_address: Pubkey,
        mint_address: Pubkey,
        schedules: Vec<VestingSchedule>,
    ) -> Result<Self, VestingError> {
        if schedules.is_empty() {
            return Err(VestingError::InvalidInstruction);
        }
        let contract = Self {
            header: VestingScheduleHeader {
                destination_address,
                mint_address,
                is_initialized: true,
            },
            schedules,
        };
        contract.total_locked()?;
        Ok(contract)
    }

    /// Returns `None` for an allocated but not yet created contract.
    pub fn unpack(src: &[u8]) -> Result<Option<Self>, VestingError> {
        if src.len() < HEADER_LEN {
            return Err(VestingError::MalformedAccountError);
        }
        let (header_src, schedules_src) = src.split_at(HEADER_LEN);
        let header = VestingScheduleHeader::unpack_from_slice(header_src)
            .map_err(|_| VestingError::MalformedAccountError)?;
        if !header.is_initialized {
            return Ok(None);
        }
        if schedules_src.is_empty() {
            return Err(VestingError::MalformedAccountError);
        }
        let schedules = unpack_schedules(schedules_src)?;
        Ok(Some(Self { header, schedules }))
    }

    /// Writes the contract into `dst`, which must be exactly the account size.
    pub fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), VestingError> {
        if dst.len() != Self::state_size(self.schedules.len())? {
            return Err(VestingError::MalformedAccountError);
        }
        let (header_dst, schedules_dst) = dst.split_at_mut(HEADER_LEN);
        self.header.pack_into_slice(header_dst);
        pack_schedules_into_slice(&self.schedules, schedules_dst)
    }

    pub fn pack(&self) -> Result<Vec<u8>, VestingError> {
        let mut buf = vec![0u8; Self::state_size(self.schedules.len())?];
        self.pack_into_slice(&mut buf)?;
        Ok(buf)
    }

    /// Sum of every tranche still held by the vault.
    pub fn total_locked(&self) -> Result<u64, VestingError> {
        self.schedules.iter().try_fold(0u64, |total, s| {
            total
                .checked_add(s.amount)
                .ok_or(VestingError::ArithmeticOverflow)
        })
    }

    /// Amount an unlock at `now` would pay, without consuming anything.
    pub fn due_amount(&self, now: i64) -> Result<u64, VestingError> {
        self.schedules
            .iter()
            .filter(|s| s.is_due(now))
            .try_fold(0u64, |total, s| {
                total
                    .checked_add(s.amount)
                    .ok_or(VestingError::ArithmeticOverflow)
            })
    }

    /// Consumes every due tranche and returns the amount to pay out.
    ///
    /// The total is computed before any tranche is zeroed, so an error leaves
    /// the schedules untouched. Paid tranches stay in place with a zero amount.
    pub fn release_due(&mut self, now: i64) -> Result<u64, VestingError> {
        let total = self.due_amount(now)?;
        for schedule in self.schedules.iter_mut().filter(|s| s.is_due(now)) {
            schedule.amount = 0;
        }
        Ok(total)
    }

    pub fn set_destination(&mut self, destination_address: Pubkey) {
        self.header.destination_address = destination_address;
    }

    pub fn is_fully_unlocked(&self) -> bool {
        self.schedules.iter().all(VestingSchedule::is_paid)
    }
}

impl fmt::Display for ContractInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mint: {}", self.header.mint_address)?;
        writeln!(f, "Destination: {}", self.header.destination_address)?;
        for (i, schedule) in self.schedules.iter().enumerate() {
            writeln!(
                f,
                "Schedule {}: release time {}, amount {}",
                i, schedule.release_time, schedule.amount
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(schedules: &[(u64, u64)]) -> ContractInfo {
        ContractInfo::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            schedules
                .iter()
                .map(|&(t, a)| VestingSchedule::new(t, a))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_state_packing() {
        let info = contract(&[(30_767_976, 969), (32_767_076, 420)]);
        let packed = info.pack().unwrap();

        let mut expected = Vec::with_capacity(97);
        expected.extend_from_slice(info.header.destination_address.as_ref());
        expected.extend_from_slice(info.header.mint_address.as_ref());
        expected.push(1);
        expected.extend_from_slice(&30_767_976u64.to_le_bytes());
        expected.extend_from_slice(&969u64.to_le_bytes());
        expected.extend_from_slice(&32_767_076u64.to_le_bytes());
        expected.extend_from_slice(&420u64.to_le_bytes());

        assert_eq!(packed, expected);
        assert_eq!(packed.len(), ContractInfo::state_size(2).unwrap());
        assert_eq!(ContractInfo::unpack(&packed).unwrap(), Some(info));
    }

    #[test]
    fn test_uninitialized_contract_is_absent() {
        let zeroed = vec![0u8; ContractInfo::state_size(3).unwrap()];
        assert_eq!(ContractInfo::unpack(&zeroed).unwrap(), None);
    }

    #[test]
    fn test_malformed_tails() {
        let packed = contract(&[(1, 1), (2, 2)]).pack().unwrap();
        for len in [HEADER_LEN, HEADER_LEN + 1, HEADER_LEN + 15, HEADER_LEN + 17, 96] {
            assert_eq!(
                ContractInfo::unpack(&packed[..len]),
                Err(VestingError::MalformedAccountError),
                "length {}",
                len
            );
        }
        assert_eq!(
            ContractInfo::unpack(&packed[..HEADER_LEN - 1]),
            Err(VestingError::MalformedAccountError)
        );
    }

    #[test]
    fn test_schedule_capacity() {
        assert_eq!(ContractInfo::schedule_capacity(97).unwrap(), 2);
        assert_eq!(
            ContractInfo::schedule_capacity(HEADER_LEN),
            Err(VestingError::MalformedAccountError)
        );
        assert_eq!(
            ContractInfo::schedule_capacity(70),
            Err(VestingError::MalformedAccountError)
        );
    }

    #[test]
    fn test_new_rejects_overflowing_total() {
        let result = ContractInfo::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            vec![VestingSchedule::new(1, u64::MAX), VestingSchedule::new(2, 1)],
        );
        assert_eq!(result, Err(VestingError::ArithmeticOverflow));
    }

    #[test]
    fn test_new_rejects_empty_schedules() {
        let result = ContractInfo::new(Pubkey::new_unique(), Pubkey::new_unique(), vec![]);
        assert_eq!(result, Err(VestingError::InvalidInstruction));
    }

    #[test]
    fn test_release_due_walkthrough() {
        let mut info = contract(&[(100, 10), (200, 20)]);
        assert_eq!(info.total_locked().unwrap(), 30);

        assert_eq!(info.release_due(50).unwrap(), 0);
        assert_eq!(info.release_due(150).unwrap(), 10);
        assert_eq!(info.schedules[0], VestingSchedule::new(100, 0));
        assert_eq!(info.schedules[1], VestingSchedule::new(200, 20));

        assert_eq!(info.release_due(150).unwrap(), 0);
        assert_eq!(info.release_due(250).unwrap(), 20);
        assert!(info.is_fully_unlocked());
        assert_eq!(info.release_due(300).unwrap(), 0);
        assert_eq!(info.schedules.len(), 2);
        assert_eq!(info.total_locked().unwrap(), 0);
    }

    #[test]
    fn test_unordered_schedules_release_by_time() {
        let mut info = contract(&[(300, 3), (100, 1), (200, 2), (100, 0)]);
        assert_eq!(info.due_amount(200).unwrap(), 3);
        assert_eq!(info.release_due(200).unwrap(), 3);
        assert_eq!(info.schedules[0].amount, 3);
        assert_eq!(info.total_locked().unwrap(), 3);
    }

    #[test]
    fn test_change_destination_keeps_schedules() {
        let mut info = contract(&[(100, 10), (200, 20)]);
        info.release_due(100).unwrap();
        let before = info.clone();
        let new_destination = Pubkey::new_unique();

        info.set_destination(new_destination);

        assert_eq!(info.header.destination_address, new_destination);
        assert_eq!(info.header.mint_address, before.header.mint_address);
        assert_eq!(info.schedules, before.schedules);
    }

    #[test]
    fn test_display_lists_schedules() {
        let info = contract(&[(100, 10)]);
        let rendered = info.to_string();
        assert!(rendered.contains("Schedule 0: release time 100, amount 10"));
        assert!(rendered.contains(&info.header.mint_address.to_string()));
    }
}
